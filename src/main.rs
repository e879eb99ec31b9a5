fn main() -> anyhow::Result<()> {
    probgen::logging::init_logging();
    probgen::run()
}
