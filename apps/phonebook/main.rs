use std::sync::Arc;
use clap::{error, Parser, ArgMatches, Command};
use reedline::{Reedline, Signal};

mod prompt;
use prompt::MyPrompt;

mod cmds {
    pub(crate) mod contact_cmd;
    pub(crate) mod list_cmd;
}

use phonebook::{
    configuration as cfg,
    logger,
    ContactForm,
    ContactId,
    ContactList,
    EditForm,
    GraphQLClient,
    MemoryFavorites,
    Route,
    Submission,
};

use phonebook::directory::{
    contact_list::LOAD_ERROR_MESSAGE,
    ListRender,
};

fn build_cli() -> Command {
    let mut cmd = Command::new("phonebook")
        .about("Interactive contact directory shell")
        .no_binary_name(true)
        .subcommand_required(true)
        .subcommand(cmds::list_cmd::list_cli())
        .subcommand(cmds::list_cmd::search_cli())
        .subcommand(cmds::list_cmd::next_cli())
        .subcommand(cmds::list_cmd::prev_cli())
        .subcommand(cmds::list_cmd::fav_cli())
        .subcommand(cmds::list_cmd::delete_cli())
        .subcommand(cmds::list_cmd::goto_cli())
        .subcommand(cmds::contact_cmd::add_cli())
        .subcommand(cmds::contact_cmd::edit_cli())
        .subcommand(cmds::contact_cmd::discard_cli())
        .help_template("{subcommands}");

    cmd.error(error::ErrorKind::InvalidSubcommand, "Invalid command provided");
    cmd
}

struct Session {
    client      : GraphQLClient,
    list        : ContactList,
    route       : Route,
    add_form    : Option<ContactForm>,
    edit_form   : Option<EditForm>,
}

impl Session {
    async fn show_list(&mut self, refetch: bool) {
        self.route = Route::List;
        if refetch {
            self.list.refresh(&self.client).await;
        }
        render_list(&self.list);
    }

    async fn open_edit(&mut self, id: ContactId) -> bool {
        if self.edit_form.as_ref().is_some_and(|f| f.id() == id) {
            return true;
        }

        match EditForm::load(&self.client, id).await {
            Ok(form) => {
                self.edit_form = Some(form);
                true
            },
            Err(e) => {
                log::error!("Error loading contact {}: {}", id, e);
                println!("{}", LOAD_ERROR_MESSAGE);
                false
            }
        }
    }

    async fn settle(&mut self, submission: Submission, message: Option<&str>) {
        match submission.next_route() {
            Some(_) => {
                if let Submission::Saved(contact) = &submission {
                    println!("Saved: {}", contact);
                }
                self.show_list(true).await;
            },
            None => {
                if let Some(msg) = message {
                    println!("{}", msg);
                }
            }
        }
    }
}

fn render_list(list: &ContactList) {
    println!("Contact List");
    if !list.query().is_empty() {
        println!("Search: {}", list.query());
    }

    match list.render() {
        ListRender::Contacts(entries) => {
            for entry in entries {
                let star = if entry.favorite { "*" } else { " " };
                let contact = entry.contact;
                println!(" {} [{}] {}", star, contact.id(), contact.full_name());
                println!("\tavatar: {}", contact.avatar_url());
                println!("\tphones: {}", contact.phone_numbers().join(", "));
            }
        },
        other => {
            println!("{}", other.message().unwrap_or_default());
        }
    }

    if matches!(list.render(), ListRender::Loading | ListRender::Failed) {
        return;
    }
    println!(
        "page {} {} {}",
        list.window().page() + 1,
        if list.has_previous() { "[prev]" } else { "" },
        if list.has_next() { "[next]" } else { "" }
    );
}

fn render_add_form(form: &ContactForm) {
    println!("Add Contact");
    if let Some(msg) = form.message() {
        println!("{}", msg);
    }
    println!(" first name:\t{}", form.first_name());
    println!(" last name:\t{}", form.last_name());
    for (index, number) in form.phone_numbers().iter().enumerate() {
        println!(" phone[{}]:\t{}", index, number);
    }
}

fn render_edit_form(form: &EditForm) {
    println!("Edit Contact {}", form.id());
    if let Some(msg) = form.message() {
        println!("{}", msg);
    }
    println!(" first name:\t{}", form.first_name());
    println!(" last name:\t{}", form.last_name());
    for (index, slot) in form.slots().iter().enumerate() {
        println!(" phone[{}]:\t{}", index, slot.number());
    }
}

fn parse_slot(input: &str) -> Option<(usize, &str)> {
    let (slot, number) = input.split_once('=')?;
    Some((slot.trim().parse().ok()?, number))
}

/// Text typed after `cmd`, spacing kept as entered.
fn raw_remainder<'a>(line: &'a str, cmd: &str) -> &'a str {
    let rest = line.trim_start().strip_prefix(cmd).unwrap_or_default();
    rest.strip_prefix(|c: char| c.is_whitespace()).unwrap_or(rest)
}

async fn execute_command(matches: ArgMatches, line: &str, session: &mut Session) {
    match matches.subcommand() {
        Some(("list", _)) => session.show_list(true).await,

        Some(("search", _)) => {
            session.list.set_query(raw_remainder(line, "search"));
            session.show_list(false).await;
        },

        Some(("next", _)) => {
            if !session.list.next_page(&session.client).await {
                println!("No next page");
                return;
            }
            session.show_list(false).await;
        },

        Some(("prev", _)) => {
            if !session.list.previous_page(&session.client).await {
                println!("Already on the first page");
                return;
            }
            session.show_list(false).await;
        },

        Some(("fav", m)) => {
            let Some(id) = m.get_one::<i32>("ID").copied() else {
                return;
            };
            let id = ContactId::from(id);
            match session.list.toggle_favorite(id) {
                true => println!("Contact {} marked as favorite", id),
                false => println!("Contact {} unmarked", id),
            }
            session.show_list(false).await;
        },

        Some(("delete", m)) => {
            let Some(id) = m.get_one::<i32>("ID").copied() else {
                return;
            };
            let id = ContactId::from(id);
            if session.list.delete(&session.client, id).await.is_ok() {
                println!("Contact {} is deleted.", id);
                session.show_list(false).await;
            }
        },

        Some(("goto", m)) => {
            let Some(path) = m.get_one::<String>("PATH") else {
                return;
            };
            match Route::resolve(path) {
                Route::List => session.show_list(true).await,
                Route::Add => {
                    session.route = Route::Add;
                    render_add_form(session.add_form.get_or_insert_with(ContactForm::new));
                },
                Route::Edit(id) => {
                    if session.open_edit(id).await {
                        session.route = Route::Edit(id);
                        if let Some(form) = session.edit_form.as_ref() {
                            render_edit_form(form);
                        }
                    }
                },
            }
        },

        Some(("add", m)) => {
            session.route = Route::Add;
            let form = session.add_form.get_or_insert_with(ContactForm::new);

            if let Some(first) = m.get_one::<String>("first") {
                form.set_first_name(first);
            }
            if let Some(last) = m.get_one::<String>("last") {
                form.set_last_name(last);
            }
            if let Some(phones) = m.get_many::<String>("phone") {
                for (index, number) in phones.enumerate() {
                    if index >= form.phone_numbers().len() {
                        form.add_phone_number();
                    }
                    _ = form.set_phone_number(index, number);
                }
            }

            let submission = match form.submit(&session.client).await {
                Ok(v) => v,
                Err(e) => {
                    println!("Error: {}", e);
                    return;
                }
            };

            let message = form.message();
            if submission.next_route().is_some() {
                session.add_form = None;
            }
            session.settle(submission, message).await;
        },

        Some(("edit", m)) => {
            let Some(id) = m.get_one::<i32>("ID").copied() else {
                return;
            };
            let id = ContactId::from(id);
            if !session.open_edit(id).await {
                return;
            }
            session.route = Route::Edit(id);

            let Some(form) = session.edit_form.as_mut() else {
                return;
            };
            if let Some(first) = m.get_one::<String>("first") {
                form.set_first_name(first);
            }
            if let Some(last) = m.get_one::<String>("last") {
                form.set_last_name(last);
            }
            if let Some(phones) = m.get_many::<String>("phone") {
                for input in phones {
                    let Some((slot, number)) = parse_slot(input) else {
                        println!("Error: expected SLOT=NUMBER, got {}", input);
                        return;
                    };
                    if let Err(e) = form.set_phone_number(slot, number) {
                        println!("Error: {}", e);
                        return;
                    }
                }
            }

            let submission = match form.submit(&session.client).await {
                Ok(v) => v,
                Err(e) => {
                    println!("Error: {}", e);
                    return;
                }
            };

            if let Some(report) = form.report().filter(|v| v.is_partial()) {
                println!(
                    "Partially saved: name {}, {} phone(s) updated, stopped at slot {}",
                    if report.name_updated() { "updated" } else { "unchanged" },
                    report.committed_phones().len(),
                    report.failed_slot().unwrap_or_default()
                );
            }

            let message = form.message();
            if submission.next_route().is_some() {
                session.edit_form = None;
            }
            session.settle(submission, message).await;
        },

        Some(("discard", _)) => {
            session.add_form = None;
            session.edit_form = None;
            println!("Unsaved forms discarded");
        },

        _ => println!("Unknown command"),
    }
}

#[derive(Parser, Debug)]
#[command(name = "phonebook")]
#[command(version = "1.0")]
#[command(about = "Interactive contact directory shell", long_about = None)]
struct Options {
    /// The configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// GraphQL endpoint, overrides the configuration file
    #[arg(short, long, value_name = "URL")]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() {
    let opts = Options::parse();

    let mut builder = cfg::Builder::new();
    if let Some(path) = opts.config.as_ref() {
        if let Err(e) = builder.load(path) {
            eprintln!("{e}");
            return;
        }
    }
    if let Some(endpoint) = opts.endpoint.as_ref() {
        builder.with_endpoint(endpoint);
    }

    let cfg = match builder.build() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    #[cfg(feature = "inspect")] {
        cfg.dump();
    }

    if let Err(e) = logger::setup(cfg.log_level(), cfg.log_file()) {
        eprintln!("{e}");
        return;
    }

    let client = match GraphQLClient::from_config(cfg.as_ref()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Creating GraphQL client error: {e}");
            return;
        }
    };

    let mut session = Session {
        client,
        list        : ContactList::new(Arc::new(MemoryFavorites::new())),
        route       : Route::List,
        add_form    : None,
        edit_form   : None,
    };

    let mut cli = build_cli();
    let mut rl = Reedline::create();

    println!("Welcome to the phonebook shell. Type 'exit' to quit.\n");
    session.show_list(true).await;

    loop {
        let prompt = MyPrompt { view: session.route.to_string() };
        let Ok(sig) = rl.read_line(&prompt) else {
            println!("\n Fatal error occurred.");
            continue;
        };
        match sig {
            Signal::Success(line) => {
                let input = line.trim();

                if input.is_empty() {
                    continue;
                }

                match input {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    },
                    "help" => {
                        _ = cli.print_long_help();
                        continue;
                    }
                    _ => {}
                }

                let args: Vec<String> = input.split_whitespace().map(|s| s.to_string())
                    .collect();

                if args[0] == "help" && args.len() > 1 {
                    _ = match cli.find_subcommand_mut(args[1].as_str()) {
                        Some(cmd) => cmd.print_long_help(),
                        None => cli.print_long_help(),
                    };
                    continue;
                }

                let cmd = args.join(" ");
                match cli.clone().try_get_matches_from(args) {
                    Ok(matches) => execute_command(matches, &line, &mut session).await,
                    Err(_) => {
                        println!("Error: command not found: '{}'", cmd);
                    }
                }
            }
            Signal::CtrlC | Signal::CtrlD => {
                println!("\nGoodbye!");
                break;
            }
        }
    }

    logger::teardown();
}
