//! The interactive menu.
//!
//! Reads from any `BufRead` and writes to any `Write`, so tests drive it with
//! canned input. End of input behaves like choosing "Exit".

use super::print::{
    print_contact_details, print_contact_list, print_error, print_messages, print_stats,
};
use colored::Colorize;
use rolodex::api::RolodexApi;
use rolodex::error::Result;
use rolodex::model::{ContactUpdate, NewContact};
use rolodex::store::DataStore;
use rolodex::validate::{validate_email, validate_phone};
use std::io::{BufRead, Write};

const MENU: [&str; 8] = [
    "Add New Contact",
    "Search Contact",
    "Update Contact",
    "Delete Contact",
    "View All Contacts",
    "Export to CSV",
    "View Statistics",
    "Exit",
];

pub struct Shell<'a, S: DataStore, R: BufRead, W: Write> {
    api: &'a mut RolodexApi<S>,
    input: R,
    out: W,
    export_file: String,
}

enum Flow {
    Continue,
    Quit,
}

impl<'a, S: DataStore, R: BufRead, W: Write> Shell<'a, S, R, W> {
    pub fn new(api: &'a mut RolodexApi<S>, input: R, out: W, export_file: String) -> Self {
        Self {
            api,
            input,
            out,
            export_file,
        }
    }

    pub fn run(mut self) -> Result<()> {
        let load_messages = self.api.load_messages();
        print_messages(&mut self.out, &load_messages)?;

        loop {
            self.print_menu()?;
            let choice = match self.prompt("Enter your choice (1-8): ")? {
                Some(choice) => choice,
                None => {
                    self.exit()?;
                    return Ok(());
                }
            };

            let flow = match choice.as_str() {
                "1" => self.add()?,
                "2" => self.search()?,
                "3" => self.update(None)?,
                "4" => self.delete()?,
                "5" => self.list()?,
                "6" => self.export()?,
                "7" => self.stats()?,
                "8" => {
                    self.exit()?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.out, "{}", "Invalid choice. Please try again.".red())?;
                    Flow::Continue
                }
            };

            if let Flow::Quit = flow {
                self.exit()?;
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "=".repeat(30))?;
        writeln!(self.out, "{}", "          MAIN MENU".bold())?;
        writeln!(self.out, "{}", "=".repeat(30))?;
        for (i, label) in MENU.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, label)?;
        }
        writeln!(self.out, "{}", "=".repeat(30))?;
        Ok(())
    }

    /// Prints `label`, reads one line and trims it. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn confirm(&mut self, label: &str) -> Result<Option<bool>> {
        Ok(self
            .prompt(label)?
            .map(|answer| answer.eq_ignore_ascii_case("y")))
    }

    fn add(&mut self) -> Result<Flow> {
        writeln!(self.out, "\n{}", "--- ADD NEW CONTACT ---".bold())?;

        let mut overwrite = false;
        let name = loop {
            let Some(name) = self.prompt("Enter contact name: ")? else {
                return Ok(Flow::Quit);
            };
            if name.is_empty() {
                writeln!(self.out, "{}", "Name cannot be empty!".red())?;
                continue;
            }
            if self.api.contacts().contains(&name) {
                writeln!(
                    self.out,
                    "{}",
                    format!("Contact '{}' already exists!", name).yellow()
                )?;
                let Some(choice) =
                    self.prompt("(u)pdate it, (o)verwrite it, or (c)ancel? [u/o/c]: ")?
                else {
                    return Ok(Flow::Quit);
                };
                match choice.to_lowercase().as_str() {
                    "u" | "update" => return self.update(Some(name)),
                    "o" | "overwrite" => overwrite = true,
                    _ => {
                        writeln!(self.out, "{}", "Contact not added.".dimmed())?;
                        return Ok(Flow::Continue);
                    }
                }
            }
            break name;
        };

        let phone = loop {
            let Some(phone) = self.prompt("Enter phone number: ")? else {
                return Ok(Flow::Quit);
            };
            if validate_phone(&phone).is_ok() {
                break phone;
            }
            writeln!(
                self.out,
                "{}",
                "Invalid phone number! Please enter 10-15 digits.".red()
            )?;
        };

        let email = loop {
            let Some(email) = self.prompt("Enter email (optional, press Enter to skip): ")? else {
                return Ok(Flow::Quit);
            };
            if email.is_empty() || validate_email(&email) {
                break email;
            }
            writeln!(self.out, "{}", "Invalid email format!".red())?;
        };

        let Some(address) = self.prompt("Enter address (optional): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(group) = self.prompt("Enter group (Friends/Work/Family/Other): ")? else {
            return Ok(Flow::Quit);
        };

        let new = NewContact::new(name, phone)
            .email(email)
            .address(address)
            .group(group);
        match self.api.add_contact(new, overwrite) {
            Ok(result) => print_messages(&mut self.out, &result.messages)?,
            Err(e) => print_error(&mut self.out, &e)?,
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(query) = self.prompt("Enter name to search: ")? else {
            return Ok(Flow::Quit);
        };
        match self.api.search(&query) {
            Ok(result) => {
                print_messages(&mut self.out, &result.messages)?;
                print_contact_details(&mut self.out, &result.contacts)?;
            }
            Err(e) => print_error(&mut self.out, &e)?,
        }
        Ok(Flow::Continue)
    }

    fn update(&mut self, name: Option<String>) -> Result<Flow> {
        let name = match name {
            Some(name) => name,
            None => match self.prompt("Enter contact name to update: ")? {
                Some(name) => name,
                None => return Ok(Flow::Quit),
            },
        };

        let Some(current) = self.api.contacts().get(&name) else {
            writeln!(
                self.out,
                "{}",
                format!("Contact '{}' not found!", name).red()
            )?;
            return Ok(Flow::Continue);
        };

        writeln!(
            self.out,
            "\n{}",
            format!("--- UPDATE CONTACT: {} ---", name.trim()).bold()
        )?;

        let email_now = current.email.as_deref().unwrap_or("None");
        let address_now = current.address.as_deref().unwrap_or("None");
        let questions = [
            format!("Enter new phone (current: {}, press Enter to skip): ", current.phone),
            format!("Enter new email (current: {}, press Enter to skip): ", email_now),
            format!("Enter new address (current: {}, press Enter to skip): ", address_now),
            format!("Enter new group (current: {}, press Enter to skip): ", current.group),
        ];
        let mut answers = Vec::with_capacity(questions.len());
        for question in &questions {
            match self.prompt(question)? {
                Some(answer) => answers.push(answer),
                None => return Ok(Flow::Quit),
            }
        }
        let mut answers = answers.into_iter();
        let update = ContactUpdate {
            phone: answers.next(),
            email: answers.next(),
            address: answers.next(),
            group: answers.next(),
        };
        match self.api.update_contact(&name, update) {
            Ok(result) => print_messages(&mut self.out, &result.messages)?,
            Err(e) => print_error(&mut self.out, &e)?,
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter contact name to delete: ")? else {
            return Ok(Flow::Quit);
        };
        if !self.api.contacts().contains(&name) {
            writeln!(
                self.out,
                "{}",
                format!("Contact '{}' not found!", name).red()
            )?;
            return Ok(Flow::Continue);
        }

        let question = format!("Are you sure you want to delete '{}'? (y/n): ", name);
        match self.confirm(&question)? {
            None => return Ok(Flow::Quit),
            Some(false) => writeln!(self.out, "{}", "Deletion cancelled.".dimmed())?,
            Some(true) => match self.api.delete_contact(&name) {
                Ok(result) => print_messages(&mut self.out, &result.messages)?,
                Err(e) => print_error(&mut self.out, &e)?,
            },
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> Result<Flow> {
        match self.api.list() {
            Ok(result) => {
                print_messages(&mut self.out, &result.messages)?;
                print_contact_list(&mut self.out, &result.contacts)?;
            }
            Err(e) => print_error(&mut self.out, &e)?,
        }
        Ok(Flow::Continue)
    }

    fn export(&mut self) -> Result<Flow> {
        if self.api.contacts().is_empty() {
            writeln!(self.out, "{}", "No contacts to export.".dimmed())?;
            return Ok(Flow::Continue);
        }

        let question = format!("Enter CSV filename (default: {}): ", self.export_file);
        let Some(answer) = self.prompt(&question)? else {
            return Ok(Flow::Quit);
        };
        let filename = if answer.is_empty() {
            self.export_file.clone()
        } else {
            answer
        };

        match self.api.export_csv(Some(&filename)) {
            Ok(result) => print_messages(&mut self.out, &result.messages)?,
            Err(e) => print_error(&mut self.out, &format!("Error exporting: {}", e))?,
        }
        Ok(Flow::Continue)
    }

    fn stats(&mut self) -> Result<Flow> {
        match self.api.stats() {
            Ok(result) => {
                if let Some(stats) = &result.stats {
                    print_stats(&mut self.out, stats)?;
                }
            }
            Err(e) => print_error(&mut self.out, &e)?,
        }
        Ok(Flow::Continue)
    }

    fn exit(&mut self) -> Result<()> {
        let result = self.api.save();
        print_messages(&mut self.out, &result.messages)?;
        writeln!(self.out, "\n{}", "=".repeat(50))?;
        writeln!(self.out, "Thank you for using rolodex!")?;
        writeln!(self.out, "{}", "=".repeat(50))?;
        Ok(())
    }
}
