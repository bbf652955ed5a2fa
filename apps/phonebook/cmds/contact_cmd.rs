use clap::{Command, Arg, ArgAction};

pub(crate) fn add_cli() -> Command {
    Command::new("add")
        .about("Fill in and save the add-contact form")
        .arg(
            Arg::new("first")
                .long("first")
                .help("First name"),
        )
        .arg(
            Arg::new("last")
                .long("last")
                .help("Last name"),
        )
        .arg(
            Arg::new("phone")
                .long("phone")
                .action(ArgAction::Append)
                .help("Phone number, repeat for more"),
        )
}

pub(crate) fn edit_cli() -> Command {
    Command::new("edit")
        .about("Fill in and save the edit form of a contact")
        .arg(
            Arg::new("ID")
                .required(true)
                .value_parser(clap::value_parser!(i32))
                .help("Contact ID"),
        )
        .arg(
            Arg::new("first")
                .long("first")
                .help("New first name"),
        )
        .arg(
            Arg::new("last")
                .long("last")
                .help("New last name"),
        )
        .arg(
            Arg::new("phone")
                .long("phone")
                .value_name("SLOT=NUMBER")
                .action(ArgAction::Append)
                .help("New number for a phone slot, counted from 0"),
        )
}

pub(crate) fn discard_cli() -> Command {
    Command::new("discard")
        .about("Throw away unsaved form contents")
}
