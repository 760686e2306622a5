pub mod mod_created;
pub mod mod_invalid;
