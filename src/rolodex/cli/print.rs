use chrono::{DateTime, Utc};
use colored::Colorize;
use console::Term;
use rolodex::api::{CmdMessage, MessageLevel};
use rolodex::model::Contact;
use rolodex::report::Stats;
use std::io::{self, Write};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const MIN_LINE_WIDTH: usize = 60;
const TIME_WIDTH: usize = 16;
const PHONE_WIDTH: usize = 16;
const GROUP_WIDTH: usize = 12;

pub(super) fn print_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

pub(super) fn print_error<W: Write>(out: &mut W, error: &dyn std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{}", error.to_string().red())
}

/// Numbered detail blocks, used for search results.
pub(super) fn print_contact_details<W: Write>(
    out: &mut W,
    contacts: &[(String, Contact)],
) -> io::Result<()> {
    if contacts.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(50))?;
    for (i, (name, contact)) in contacts.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, name.bold())?;
        writeln!(out, "   Phone:   {}", contact.phone)?;
        if let Some(email) = &contact.email {
            writeln!(out, "   Email:   {}", email)?;
        }
        if let Some(address) = &contact.address {
            writeln!(out, "   Address: {}", address)?;
        }
        writeln!(out, "   Group:   {}", contact.group.cyan())?;
        writeln!(out)?;
    }
    Ok(())
}

/// One line per contact: name, phone, email, group, last update.
pub(super) fn print_contact_list<W: Write>(
    out: &mut W,
    contacts: &[(String, Contact)],
) -> io::Result<()> {
    if contacts.is_empty() {
        return Ok(());
    }

    let width = line_width();
    writeln!(
        out,
        "{}",
        format!("All contacts ({} total)", contacts.len()).bold()
    )?;
    writeln!(out, "{}", "=".repeat(width))?;

    let now = Utc::now();
    let fixed = PHONE_WIDTH + GROUP_WIDTH + TIME_WIDTH;
    let flexible = width.saturating_sub(fixed);
    let name_width = flexible / 2;
    let email_width = flexible - name_width;

    for (name, contact) in contacts {
        let email = contact.email.as_deref().unwrap_or("");
        writeln!(
            out,
            "{}{}{}{}{}",
            pad_to_width(name, name_width).bold(),
            pad_to_width(&contact.phone, PHONE_WIDTH),
            pad_to_width(email, email_width),
            pad_to_width(&contact.group, GROUP_WIDTH).cyan(),
            format_time_ago(contact.updated_at, now).dimmed()
        )?;
    }
    Ok(())
}

pub(super) fn print_stats<W: Write>(out: &mut W, stats: &Stats) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "--- CONTACT STATISTICS ---".bold())?;
    writeln!(out, "Total Contacts: {}", stats.total)?;
    writeln!(out)?;
    writeln!(out, "Contacts by Group:")?;
    for (group, count) in &stats.groups {
        writeln!(out, "  {}: {} contact(s)", group.cyan(), count)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Recently Updated (last {} days): {}",
        stats.window_days, stats.recently_updated
    )
}

fn line_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(LINE_WIDTH)
        .clamp(MIN_LINE_WIDTH, LINE_WIDTH)
}

/// Truncates with an ellipsis or pads with spaces so the cell is exactly
/// `width` columns, leaving one column as a separator.
fn pad_to_width(s: &str, width: usize) -> String {
    let max = width.saturating_sub(1);
    let mut result = String::new();
    let mut current = 0;

    if s.width() > max {
        for c in s.chars() {
            let w = c.width().unwrap_or(0);
            if current + w > max.saturating_sub(1) {
                break;
            }
            result.push(c);
            current += w;
        }
        result.push('…');
        current += 1;
    } else {
        result.push_str(s);
        current = s.width();
    }

    result.push_str(&" ".repeat(width.saturating_sub(current)));
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
