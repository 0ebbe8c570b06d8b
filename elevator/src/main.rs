fn main() -> anyhow::Result<()> {
    elevator::modules::run()
}
