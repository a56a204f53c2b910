//! Declarative menu table for the interactive mode.
//!
//! The table is the single source for menu order, labels, keyboard
//! shortcuts and the action each entry triggers. Selections can be given as
//! `<menu>.<item>` numbers (`1.4`), item keys (`commit`) or shortcuts
//! (`ctrl-s`).

use std::fmt::Write as _;

/// What a menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Clone,
    Init,
    Add,
    Commit,
    Push,
    Pull,
    Fetch,
    Status,
    GitStatus,
    ChangePath,
    Exit,
    ListBranches,
    NewBranch,
    SwitchBranch,
    DeleteBranch,
    FirstTimeSetup,
    SetToken,
    DeleteToken,
    TokenStatus,
    History,
    ShowCommit,
    Readme,
    About,
    SshKeys,
    Separator,
}

/// One entry of a menu.
#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    /// Word typed to select the entry.
    pub key: &'static str,
    /// Text shown in the menu.
    pub label: &'static str,
    pub action: MenuAction,
    pub shortcut: Option<&'static str>,
}

/// A titled list of entries.
#[derive(Debug, Clone, Copy)]
pub struct Menu {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

const fn item(key: &'static str, label: &'static str, action: MenuAction) -> MenuItem {
    MenuItem {
        key,
        label,
        action,
        shortcut: None,
    }
}

const fn shortcut(
    key: &'static str,
    label: &'static str,
    action: MenuAction,
    keys: &'static str,
) -> MenuItem {
    MenuItem {
        key,
        label,
        action,
        shortcut: Some(keys),
    }
}

const SEPARATOR: MenuItem = item("", "", MenuAction::Separator);

/// All menus in display order.
pub static MENUS: &[Menu] = &[
    Menu {
        title: "File",
        items: &[
            item("clone", "Clone", MenuAction::Clone),
            item("init", "Init", MenuAction::Init),
            SEPARATOR,
            shortcut("add", "Add", MenuAction::Add, "ctrl-s"),
            shortcut("commit", "Commit", MenuAction::Commit, "ctrl-c"),
            shortcut("push", "Push", MenuAction::Push, "ctrl-p"),
            item("pull", "Pull", MenuAction::Pull),
            item("fetch", "Fetch", MenuAction::Fetch),
            SEPARATOR,
            shortcut("status", "Refresh Status", MenuAction::Status, "ctrl-u"),
            item("git-status", "Status", MenuAction::GitStatus),
            item("path", "Browse...", MenuAction::ChangePath),
            SEPARATOR,
            item("exit", "Exit", MenuAction::Exit),
        ],
    },
    Menu {
        title: "Branch",
        items: &[
            item("branches", "List Branches", MenuAction::ListBranches),
            item("new-branch", "New Branch", MenuAction::NewBranch),
            item("switch", "Switch Branch", MenuAction::SwitchBranch),
            item("delete-branch", "Delete Branch", MenuAction::DeleteBranch),
        ],
    },
    Menu {
        title: "Setup",
        items: &[item("setup", "First Time Setup", MenuAction::FirstTimeSetup)],
    },
    Menu {
        title: "Credentials",
        items: &[
            item("set-token", "Set GitHub PAT", MenuAction::SetToken),
            item("delete-token", "Delete GitHub PAT", MenuAction::DeleteToken),
            item("token", "Token Status", MenuAction::TokenStatus),
        ],
    },
    Menu {
        title: "History",
        items: &[
            item("history", "Show Commit History", MenuAction::History),
            item("show", "Show Commit", MenuAction::ShowCommit),
        ],
    },
    Menu {
        title: "View",
        items: &[item("readme", "README Preview", MenuAction::Readme)],
    },
    Menu {
        title: "Help",
        items: &[
            item("about", "About", MenuAction::About),
            item("keys", "GitHub SSH Keys", MenuAction::SshKeys),
        ],
    },
];

/// Resolves a typed selection to an action.
#[must_use]
pub fn find(selection: &str) -> Option<MenuAction> {
    let selection = selection.trim().to_ascii_lowercase();
    if selection.is_empty() {
        return None;
    }
    if matches!(selection.as_str(), "q" | "quit") {
        return Some(MenuAction::Exit);
    }

    if let Some(action) = find_by_number(&selection) {
        return Some(action);
    }

    MENUS
        .iter()
        .flat_map(|m| m.items.iter())
        .filter(|i| i.action != MenuAction::Separator)
        .find(|i| i.key == selection || i.shortcut == Some(selection.as_str()))
        .map(|i| i.action)
}

/// `<menu>.<item>` where both numbers count selectable entries from 1.
fn find_by_number(selection: &str) -> Option<MenuAction> {
    let (menu, entry) = selection.split_once('.')?;
    let menu: usize = menu.parse().ok()?;
    let entry: usize = entry.parse().ok()?;

    MENUS
        .get(menu.checked_sub(1)?)?
        .items
        .iter()
        .filter(|i| i.action != MenuAction::Separator)
        .nth(entry.checked_sub(1)?)
        .map(|i| i.action)
}

/// Renders every menu with its numbers, keys and shortcuts.
#[must_use]
pub fn render() -> String {
    let mut out = String::new();

    for (m, menu) in MENUS.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", m + 1, menu.title);
        let mut number = 0;
        for entry in menu.items {
            if entry.action == MenuAction::Separator {
                out.push_str("     ----\n");
                continue;
            }
            number += 1;
            let _ = write!(out, "  {}.{number:<2} {:<20} [{}]", m + 1, entry.label, entry.key);
            if let Some(keys) = entry.shortcut {
                let _ = write!(out, " {keys}");
            }
            out.push('\n');
        }
    }
    out
}
