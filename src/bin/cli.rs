use chrono::NaiveDate;
use office_hours::{
    Dataset, Locale, RenderOptions, Renderer, Resolution, ScheduleResolver, TextRenderer,
    calendar, load_dataset_from_json, save_upcoming_changes_to_csv, telemetry,
};
use std::io::{self, Write};

struct Session {
    dataset: Option<Dataset>,
    locale: Locale,
    reference_date: NaiveDate,
}

impl Session {
    fn resolver(&self) -> ScheduleResolver {
        ScheduleResolver::new(self.locale)
    }

    fn renderer(&self) -> TextRenderer {
        TextRenderer::new(self.locale)
    }

    fn load(&mut self, path: &str) {
        match load_dataset_from_json(path) {
            Ok(dataset) => {
                println!("Loaded {} office records from {}.", dataset.len(), path);
                self.dataset = Some(dataset);
            }
            Err(e) => println!("Error loading {}: {}", path, e),
        }
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  load <path>                        Load a dataset (JSON)\n  lang <cs|en>                       Switch label language\n  date <DDMMYYYY>                    Set the reference date (default: today)\n  show <town> <office> [contacts]    Show hours and upcoming changes of an office\n  changes                            Show upcoming changes of all offices\n  today                              Show changes dated on the reference date\n  export csv <path>                  Write upcoming changes to a CSV file\n  quit|exit                          Exit\n\nArguments are split on whitespace, so town and office keys cannot contain spaces."
    );
}

fn main() {
    telemetry::init("warn");

    let mut session = Session {
        dataset: None,
        locale: Locale::default(),
        reference_date: calendar::today(),
    };
    if let Some(path) = std::env::args().nth(1) {
        session.load(&path);
    }

    println!("Office Hours (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "load" => match parts.next() {
                Some(path) => session.load(path),
                None => println!("Usage: load <path>"),
            },
            "lang" => match parts.next().map(str::parse::<Locale>) {
                Some(Ok(locale)) => {
                    session.locale = locale;
                    println!("Language set to {}.", locale);
                }
                Some(Err(e)) => println!("Error: {}", e),
                None => println!("Usage: lang <cs|en>"),
            },
            "date" => match parts.next() {
                Some(date_s) => match calendar::parse_date(date_s) {
                    Some(date) => {
                        session.reference_date = date;
                        println!("Reference date set to {}.", calendar::format_date(date_s));
                    }
                    None => println!("Invalid date (DDMMYYYY)"),
                },
                None => println!("Usage: date <DDMMYYYY>"),
            },
            "show" => {
                let town = parts.next();
                let office = parts.next();
                let contacts = parts.next() == Some("contacts");
                let (Some(town), Some(office)) = (town, office) else {
                    println!("Usage: show <town> <office> [contacts]");
                    continue;
                };
                let Some(dataset) = &session.dataset else {
                    println!("No dataset loaded. Use 'load <path>' first.");
                    continue;
                };
                let renderer = session.renderer();
                match session
                    .resolver()
                    .resolve(dataset, town, office, session.reference_date)
                {
                    Resolution::Found(view) => {
                        let options = RenderOptions::default().with_contacts(contacts);
                        print!("{}", renderer.render_view(&view, &options));
                    }
                    Resolution::NotFound { town, office } => {
                        print!("{}", renderer.render_not_found(&town, &office));
                    }
                }
            }
            "changes" => {
                let Some(dataset) = &session.dataset else {
                    println!("No dataset loaded. Use 'load <path>' first.");
                    continue;
                };
                let towns = session.resolver().overview(dataset, session.reference_date);
                print!("{}", session.renderer().render_overview(&towns));
            }
            "today" => {
                let Some(dataset) = &session.dataset else {
                    println!("No dataset loaded. Use 'load <path>' first.");
                    continue;
                };
                let resolver = session.resolver();
                let mut any = false;
                for record in dataset {
                    for change in resolver.changes_on(record, session.reference_date) {
                        any = true;
                        println!(
                            "{} – {}: {} {}",
                            record.town,
                            record.office,
                            change.date_label,
                            change.display_text()
                        );
                    }
                }
                if !any {
                    println!("{}", session.locale.labels().no_changes);
                }
            }
            "export" => {
                let format = parts.next();
                let path = parts.next();
                match (format, path) {
                    (Some("csv"), Some(path)) => {
                        let Some(dataset) = &session.dataset else {
                            println!("No dataset loaded. Use 'load <path>' first.");
                            continue;
                        };
                        match save_upcoming_changes_to_csv(
                            dataset,
                            &session.resolver(),
                            session.reference_date,
                            path,
                        ) {
                            Ok(rows) => println!("Exported {} changes to {}.", rows, path),
                            Err(e) => println!("Export error: {}", e),
                        }
                    }
                    _ => println!("Usage: export csv <path>"),
                }
            }
            _ => println!("Unknown command '{}'. Type 'help'.", cmd),
        }
    }
}
