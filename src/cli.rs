use std::{
    collections::HashSet,
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use chrono::{Local, NaiveDate, Utc};

use staffcal::{
    app::Scheduler,
    storage::config::Config,
    ui::day_view::DayLayout,
    ui::style::category_style,
};

#[derive(Clone, Copy)]
pub enum CliMode {
    Agenda(NaiveDate),
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    let mut agenda_date = Local::now().date_naive();
    let mut args = env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--agenda" => {
                if let Some(next) = args.peek()
                    && !next.starts_with("--")
                {
                    let date_str = args.next().expect("peeked value must exist");
                    agenda_date = NaiveDate::parse_from_str(&date_str, "%Y/%m/%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", date_str))?;
                }
            }
            "--help" => {
                println!("Usage: staffcal [--agenda [YYYY/MM/DD]]");
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(CliMode::Agenda(agenda_date))
}

pub async fn run_agenda_mode(date: NaiveDate) -> Result<(), io::Error> {
    let config = Config::load_or_create().map_err(|e| io::Error::other(e.to_string()))?;
    let mut scheduler = Scheduler::new(config);
    scheduler.refresh_all().await;

    let layout = scheduler.state().day_view(date, Utc::now());
    let agenda = format_agenda_text(&layout);
    display_with_pager(&agenda)
}

fn format_agenda_text(layout: &DayLayout) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Agenda – {}", layout.date.format("%A, %B %d, %Y")));
    lines.push(String::new());

    // Long events span several slots; print each one at its first.
    let mut seen = HashSet::new();
    let mut any = false;

    for slot in &layout.slots {
        let hour = slot.offset_minutes / 60;
        let minute = slot.offset_minutes % 60;

        for entry in slot.appointments.iter().chain(slot.others.iter()) {
            if !seen.insert(entry.event_id.clone()) {
                continue;
            }
            any = true;

            let label = category_style(entry.category).label;
            let mut line = format!("{:02}:{:02}  {:<12} {}", hour, minute, label, entry.title);
            if let Some(location) = &entry.location
                && !location.is_empty()
            {
                line.push_str(&format!(" @ {}", location));
            }
            lines.push(line);
        }

        let hidden = slot.more_appointments + slot.more_others;
        if hidden > 0 {
            lines.push(format!("{:02}:{:02}  +{} more", hour, minute, hidden));
        }
    }

    if !any {
        lines.push("Nothing scheduled.".to_string());
    }
    lines.join("\n")
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            print!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }

    Ok(())
}
