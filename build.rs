fn main() {
    // Only emit ESP-IDF link/env metadata when building for the device.
    // Host test builds (--no-default-features) skip it.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
