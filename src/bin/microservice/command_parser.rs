use clap::{Arg, ArgAction, Command};

pub fn arg_parser() -> Command {
    Command::new("microservice")
        .about("Author CRUD service backed by postgres")
        .after_help(
            "Configuration is bundled into the binary and can be overridden with APP_* \
             environment variables, e.g. APP_POSTGRES_HOST=db APP_SERVER_PORT=9000.",
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .help("Print the resolved configuration and exit")
                .action(ArgAction::SetTrue),
        )
}
