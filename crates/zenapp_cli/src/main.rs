//! CLI smoke entry point.
//!
//! Prints core linkage probes and the resolved configuration; a sanity check
//! independent from the mobile runtime.

use zenapp_core::CoreConfig;

fn main() {
    println!("zenapp_core ping={}", zenapp_core::ping());
    println!("zenapp_core version={}", zenapp_core::core_version());
    match CoreConfig::from_env() {
        Ok(config) => println!(
            "zenapp_core db_path={} collection={} log_level={}",
            config.db_path.display(),
            config.collection,
            config.log_level
        ),
        Err(err) => eprintln!("zenapp_core config_error={err}"),
    }
}
