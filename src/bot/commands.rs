// Static command table for the bot.

use super::store::PostStore;
use crate::output::truncate_chars;

/// Longest post summary shown in a reply, in characters.
const SUMMARY_CHARS: usize = 280;

/// A bot command: its name (without the leading slash) and its handler.
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    handler: fn(&PostStore) -> String,
}

pub const COMMANDS: &[Command] = &[
    Command {
        name: "start",
        description: "show the welcome message",
        handler: welcome,
    },
    Command {
        name: "help",
        description: "list available commands",
        handler: help,
    },
    Command {
        name: "python_news",
        description: "get a relatively new post mentioning Python",
        handler: random_python_post,
    },
];

/// Run the handler registered for `name`. A leading slash is accepted.
/// Returns `None` for unknown commands.
pub fn dispatch(name: &str, store: &PostStore) -> Option<String> {
    let name = name.trim().trim_start_matches('/');
    COMMANDS
        .iter()
        .find(|c| c.name == name)
        .map(|c| (c.handler)(store))
}

fn welcome(_store: &PostStore) -> String {
    "Welcome 🙌\nType in /help for a list of commands.".to_string()
}

fn help(_store: &PostStore) -> String {
    let mut message = String::from("List of commands:");
    for command in COMMANDS.iter().filter(|c| c.name != "start") {
        message.push_str(&format!("\n/{} -- {}", command.name, command.description));
    }
    message
}

fn random_python_post(store: &PostStore) -> String {
    match store.random_post() {
        Some(post) => format!("{}\n\n{}", truncate_chars(&post.text, SUMMARY_CHARS), post.link),
        None => "No posts collected yet.".to_string(),
    }
}
