mod command;
mod config;
mod logger;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
