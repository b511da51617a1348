fn main() -> anyhow::Result<()> {
    tierlab_ui_terminal::run()
}
