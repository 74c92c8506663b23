use crate::config::AppConfig;
use crate::store::{Role, StoreHandle, User, UserId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPanel {
    Roster,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Role,
}

/// A single-line text field with a byte-indexed cursor.
#[derive(Debug, Default)]
pub struct FieldInput {
    pub text: String,
    pub cursor: usize,
}

impl FieldInput {
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// Add/edit form. `editing` holds the id of the user being edited; `None`
/// means the form adds a new user on submit.
#[derive(Debug, Default)]
pub struct FormState {
    pub name: FieldInput,
    pub email: FieldInput,
    pub role: Role,
    pub field: FormField,
    pub editing: Option<UserId>,
}

impl FormState {
    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.role = Role::User;
        self.field = FormField::Name;
        self.editing = None;
    }

    pub fn load(&mut self, user: &User) {
        self.name.set_text(&user.name);
        self.email.set_text(&user.email);
        self.role = user.role;
        self.field = FormField::Name;
        self.editing = Some(user.id);
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Role,
            FormField::Role => FormField::Name,
        };
    }

    pub fn prev_field(&mut self) {
        self.field = match self.field {
            FormField::Name => FormField::Role,
            FormField::Email => FormField::Name,
            FormField::Role => FormField::Email,
        };
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut FieldInput> {
        match self.field {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Role => None,
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub store: StoreHandle,
    pub focus: FocusPanel,
    pub form: FormState,
    /// Roster selection index, clamped against the user list on render.
    pub selected: usize,
    /// Pending delete awaiting a y/n decision. The store itself never
    /// participates in confirmation.
    pub confirm_delete: Option<UserId>,
    /// Tick at which a simulated refresh completes.
    pub refresh_due: Option<u64>,
    pub tick_count: u64,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig, store: StoreHandle) -> Self {
        Self {
            config,
            store,
            focus: FocusPanel::Roster,
            form: FormState::default(),
            selected: 0,
            confirm_delete: None,
            refresh_due: None,
            tick_count: 0,
            status_message: None,
            should_quit: false,
            dirty: true,
        }
    }

    /// Seconds since startup, derived from the tick counter.
    pub fn uptime_secs(&self) -> u64 {
        self.tick_count * self.config.ui.tick_rate_ms / 1000
    }
}
