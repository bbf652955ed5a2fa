use clap::{Command, Arg, ArgAction};

pub(crate) fn list_cli() -> Command {
    Command::new("list")
        .about("Show the current page of contacts")
}

pub(crate) fn search_cli() -> Command {
    Command::new("search")
        .about("Filter the current page by first name; no text clears the filter")
        .arg(
            Arg::new("TEXT")
                .help("Part of a first name")
                .num_args(0..)
                .action(ArgAction::Append),
        )
}

pub(crate) fn next_cli() -> Command {
    Command::new("next")
        .about("Go to the next page")
}

pub(crate) fn prev_cli() -> Command {
    Command::new("prev")
        .about("Go to the previous page")
}

pub(crate) fn fav_cli() -> Command {
    Command::new("fav")
        .about("Mark or unmark a contact as favorite")
        .arg(
            Arg::new("ID")
                .required(true)
                .value_parser(clap::value_parser!(i32))
                .help("Contact ID"),
        )
}

pub(crate) fn delete_cli() -> Command {
    Command::new("delete")
        .about("Delete a contact")
        .arg(
            Arg::new("ID")
                .required(true)
                .value_parser(clap::value_parser!(i32))
                .help("Contact ID"),
        )
}

pub(crate) fn goto_cli() -> Command {
    Command::new("goto")
        .about("Open a view by path: /, /add or /edit/<ID>")
        .arg(
            Arg::new("PATH")
                .required(true)
                .help("View path"),
        )
}
