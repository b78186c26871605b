// This module setup the logger level.

use std::env;

pub fn setup(logger_level: &str) {
    if env::var_os("RUST_LOG").is_none() {
        let env = format!(
            "bootstrap_app={logger_level},bootstrap_infrastructure={logger_level},mongodb=warn"
        );

        env::set_var("RUST_LOG", env);
    }

    tracing_subscriber::fmt::init();
}
