fn main() {
    // Only the ESP-IDF firmware build needs the IDF environment exported;
    // host builds (tests, simulation) have nothing to generate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
