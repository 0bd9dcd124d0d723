//! Line-oriented console for the front desk and housekeeping views
//!
//! Parsing is pure; execution runs a command against the shared
//! [`AppState`] and returns the text to show. Store errors become
//! notifications and never end the session.

use std::fmt::Write as _;

use cleansweep_core::{
    can_summarize, messages_newest_first, room_badge, Error, HousekeeperId, Occupancy,
    PermissionMatrix, Role, Room, RoomId, RoomStatus, Store, StoreAction,
};

use crate::state::AppState;

pub const HELP: &str = "\
Commands:
  role front-desk|housekeeping|none
  hk add <name>              add a housekeeper (front desk)
  hk rm <name>               remove a housekeeper (front desk)
  hk select <name>|none      choose who you are (housekeeping)
  room add <number> <stay|out> [housekeeper]
  room vacant <number>       mark checked out (front desk)
  room clean <number>        mark cleaned (housekeeping)
  room dirty <number>        mark dirty again (housekeeping)
  rooms                      list rooms for the current view
  msg <text>                 post to the message board
  board                      show the message board
  summarize                  summarize the board (front desk)
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetRole(Option<Role>),
    AddHousekeeper(String),
    RemoveHousekeeper(String),
    SelectHousekeeper(Option<String>),
    AddRoom {
        number: String,
        occupancy: Occupancy,
        housekeeper: Option<String>,
    },
    MarkVacant(String),
    SetStatus(String, RoomStatus),
    Rooms,
    Post(String),
    Board,
    Summarize,
    Help,
    Quit,
}

/// What the console loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// Parse one input line
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (head, rest) = split_word(line);

    match head {
        "role" => match rest {
            "none" => Ok(Command::SetRole(None)),
            role => role
                .parse::<Role>()
                .map(|r| Command::SetRole(Some(r)))
                .map_err(|e| e.to_string()),
        },
        "hk" => {
            let (sub, name) = split_word(rest);
            match sub {
                "add" => Ok(Command::AddHousekeeper(name.to_string())),
                "rm" => required(name, "hk rm <name>").map(Command::RemoveHousekeeper),
                "select" if name == "none" => Ok(Command::SelectHousekeeper(None)),
                "select" => required(name, "hk select <name>|none")
                    .map(|n| Command::SelectHousekeeper(Some(n))),
                _ => Err("usage: hk add|rm|select <name>".to_string()),
            }
        }
        "room" => {
            let (sub, args) = split_word(rest);
            match sub {
                "add" => {
                    let (number, args) = split_word(args);
                    let (occupancy, housekeeper) = split_word(args);
                    if number.is_empty() || occupancy.is_empty() {
                        return Err("usage: room add <number> <stay|out> [housekeeper]".to_string());
                    }
                    let occupancy = occupancy.parse::<Occupancy>().map_err(|e| e.to_string())?;
                    Ok(Command::AddRoom {
                        number: number.to_string(),
                        occupancy,
                        housekeeper: (!housekeeper.is_empty()).then(|| housekeeper.to_string()),
                    })
                }
                "vacant" => required(args, "room vacant <number>").map(Command::MarkVacant),
                "clean" => required(args, "room clean <number>")
                    .map(|n| Command::SetStatus(n, RoomStatus::Cleaned)),
                "dirty" => required(args, "room dirty <number>")
                    .map(|n| Command::SetStatus(n, RoomStatus::Dirty)),
                _ => Err("usage: room add|vacant|clean|dirty ...".to_string()),
            }
        }
        "rooms" => Ok(Command::Rooms),
        // Empty text is left for the store to reject
        "msg" => Ok(Command::Post(rest.to_string())),
        "board" => Ok(Command::Board),
        "summarize" => Ok(Command::Summarize),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("type 'help' for commands".to_string()),
        other => Err(format!("unknown command '{}'; type 'help'", other)),
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (s, ""),
    }
}

fn required(value: &str, usage: &str) -> Result<String, String> {
    if value.is_empty() {
        Err(format!("usage: {}", usage))
    } else {
        Ok(value.to_string())
    }
}

/// Run a command against the shared state
pub async fn execute(state: &AppState, command: Command) -> Outcome {
    let text = match command {
        Command::Quit => return Outcome::Quit,
        Command::Help => HELP.to_string(),
        Command::Summarize => summarize(state).await,
        command => {
            let mut store = state.store();
            apply(&mut store, command).unwrap_or_else(|e| format!("Error: {}", e))
        }
    };
    Outcome::Continue(text)
}

fn apply(store: &mut Store, command: Command) -> Result<String, Error> {
    match command {
        Command::SetRole(role) => {
            store.set_role(role);
            Ok(match role {
                Some(role) => format!("Signed in as {}.", role),
                None => "Signed out.".to_string(),
            })
        }
        Command::AddHousekeeper(name) => {
            if PermissionMatrix::allows(store.role(), StoreAction::AddHousekeeper) {
                check_addressable(store, &name)?;
            }
            let housekeeper = store.add_housekeeper(&name)?;
            Ok(format!("{} has been added.", housekeeper.name))
        }
        Command::RemoveHousekeeper(name) => {
            let id = find_housekeeper(store, &name)?;
            let removed = store.remove_housekeeper(id)?;
            Ok(format!("{} has been removed.", removed.name))
        }
        Command::SelectHousekeeper(name) => {
            let id = name.map(|n| find_housekeeper(store, &n)).transpose()?;
            store.set_current_housekeeper(id)?;
            Ok(match store.current_housekeeper() {
                Some(housekeeper) => format!("Hello, {}.", housekeeper.name),
                None => "Selection cleared.".to_string(),
            })
        }
        Command::AddRoom {
            number,
            occupancy,
            housekeeper,
        } => {
            let assigned = housekeeper.map(|n| find_housekeeper(store, &n)).transpose()?;
            let room = store.add_room(&number, occupancy, assigned)?;
            Ok(format!("Room {} has been added.", room.room_number))
        }
        Command::MarkVacant(number) => {
            let id = find_room(store, &number)?;
            let room = store.mark_as_vacant(id)?;
            Ok(format!("Room {}: {}", room.room_number, describe_vacancy(room)))
        }
        Command::SetStatus(number, status) => {
            let id = find_room(store, &number)?;
            let room = store.update_room_status(id, status)?;
            Ok(format!("Room {} is now {}.", room.room_number, room.status))
        }
        Command::Rooms => Ok(render_rooms(store)),
        Command::Post(text) => {
            let message = store.add_message(&text)?;
            Ok(format!("Posted as {}.", message.author))
        }
        Command::Board => Ok(render_board(store)),
        Command::Summarize | Command::Help | Command::Quit => Ok(String::new()),
    }
}

async fn summarize(state: &AppState) -> String {
    {
        let store = state.store();
        let session = store.session();
        if session.is_front_desk() && !can_summarize(session.role, store.messages()) {
            return "No messages to summarize.".to_string();
        }
    }

    match state.summarize().await {
        Ok(summary) => format!("Message Summary\n{}", summary),
        Err(e) => format!("Error: {}", e),
    }
}

/// Commands address housekeepers by name, so a new name must be unique and
/// must not collide with the `none` keyword of `hk select`
fn check_addressable(store: &Store, name: &str) -> Result<(), Error> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("none") {
        return Err(Error::InvalidValue(format!("'{}' is a reserved name", name)));
    }
    if store.housekeeper_by_name(name).is_some() {
        return Err(Error::InvalidValue(format!(
            "a housekeeper named '{}' already exists",
            name
        )));
    }
    Ok(())
}

fn find_housekeeper(store: &Store, name: &str) -> Result<HousekeeperId, Error> {
    store
        .housekeeper_by_name(name)
        .map(|h| h.id)
        .ok_or_else(|| Error::InvalidValue(format!("no housekeeper named '{}'", name)))
}

fn find_room(store: &Store, number: &str) -> Result<RoomId, Error> {
    store
        .room_by_number(number)
        .map(|r| r.id)
        .ok_or_else(|| Error::InvalidValue(format!("no room numbered '{}'", number)))
}

fn describe_vacancy(room: &Room) -> &'static str {
    match (room.occupancy, room.is_vacant) {
        (Occupancy::Out, true) => "checked out",
        (Occupancy::Out, false) => "awaiting check-out",
        (Occupancy::Stay, _) => "stay-over, unchanged",
    }
}

fn room_line(room: &Room) -> String {
    let check = if room.is_cleaned() { "x" } else { " " };
    format!(
        "  [{}] {:<6} {} ({})",
        check,
        room.room_number,
        room.occupancy.label(),
        room_badge(room).variant()
    )
}

fn render_rooms(store: &Store) -> String {
    let mut out = String::new();
    match store.role() {
        Some(Role::FrontDesk) => {
            let roster = store.roster();
            for section in &roster {
                let _ = writeln!(out, "Rooms Assigned to {}", section.housekeeper.name);
                for room in &section.rooms {
                    let action = if cleansweep_core::can_mark_checked_out(room) {
                        "  <- mark checked out"
                    } else {
                        ""
                    };
                    let _ = writeln!(out, "{}{}", room_line(room), action);
                }
            }

            let unassigned: Vec<&Room> = store
                .rooms()
                .iter()
                .filter(|room| store.assignee_of(room).is_none())
                .collect();
            if !unassigned.is_empty() {
                let _ = writeln!(out, "Unassigned");
                for room in unassigned {
                    let _ = writeln!(out, "{}", room_line(room));
                }
            }

            if out.is_empty() {
                out.push_str("No rooms yet.");
            }
        }
        Some(Role::Housekeeping) => match store.current_housekeeper() {
            None => out.push_str("Select your name to see your assigned rooms."),
            Some(_) => {
                let rooms = store.my_rooms();
                if rooms.is_empty() {
                    out.push_str("You have no rooms assigned.");
                } else {
                    let _ = writeln!(out, "My Assigned Rooms");
                    for room in rooms {
                        let _ = writeln!(out, "{}", room_line(room));
                    }
                }
            }
        },
        None => out.push_str("Select a role first."),
    }
    out.trim_end().to_string()
}

fn render_board(store: &Store) -> String {
    let messages = store.messages();
    if messages.is_empty() {
        return "No messages yet.".to_string();
    }

    messages_newest_first(messages)
        .into_iter()
        .map(|m| format!("[{}] {}: {}", m.format_timestamp(), m.author, m.text))
        .collect::<Vec<_>>()
        .join("\n")
}
