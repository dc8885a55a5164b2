fn main() -> anyhow::Result<()> {
    let command_line_interface = swagger_ir::cli::CommandLineInterface::load();
    command_line_interface.run()
}
