pub mod chrono_ts_secs;
