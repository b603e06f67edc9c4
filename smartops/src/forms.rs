//! Text inputs and the three forms (login, register, add server) with their
//! client-side validation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

pub const PASSWORD_MIN_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Server name is required")]
    ServerNameRequired,
    #[error("IP address is required")]
    IpRequired,
    #[error("Invalid IP address format")]
    InvalidIp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::new(label)
        }
    }

    /// Returns true when the key edited the value.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => self.value.pop().is_some(),
            _ => false,
        }
    }

    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Shared focus cycling for a fixed list of fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Focus {
    pub index: usize,
    len: usize,
}

impl Focus {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len.max(1);
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.len.max(1) - 1) % self.len.max(1);
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }
}

/// What a key did to a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Edited,
    Moved,
    Submit,
    Cancel,
    Ignored,
}

fn route_key(focus: &mut Focus, field: &mut TextField, key: KeyEvent) -> FormInput {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            focus.next();
            FormInput::Moved
        }
        KeyCode::BackTab | KeyCode::Up => {
            focus.prev();
            FormInput::Moved
        }
        KeyCode::Enter if focus.is_last() => FormInput::Submit,
        KeyCode::Enter => {
            focus.next();
            FormInput::Moved
        }
        KeyCode::Esc => FormInput::Cancel,
        _ if field.handle_key(key) => FormInput::Edited,
        _ => FormInput::Ignored,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: TextField,
    pub password: TextField,
    pub focus: Focus,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: TextField::new("Email Address"),
            password: TextField::masked("Password"),
            focus: Focus::new(2),
        }
    }
}

impl LoginForm {
    pub fn fields(&self) -> [&TextField; 2] {
        [&self.email, &self.password]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormInput {
        let field = match self.focus.index {
            0 => &mut self.email,
            _ => &mut self.password,
        };
        route_key(&mut self.focus, field, key)
    }

    pub fn credentials(&self) -> (String, String) {
        (self.email.value.trim().to_string(), self.password.value.clone())
    }
}

/// A registration that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: TextField,
    pub email: TextField,
    pub password: TextField,
    pub confirm_password: TextField,
    pub focus: Focus,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            name: TextField::new("Full Name"),
            email: TextField::new("Email Address"),
            password: TextField::masked("Password"),
            confirm_password: TextField::masked("Confirm Password"),
            focus: Focus::new(4),
        }
    }
}

impl RegisterForm {
    pub fn fields(&self) -> [&TextField; 4] {
        [&self.name, &self.email, &self.password, &self.confirm_password]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormInput {
        let field = match self.focus.index {
            0 => &mut self.name,
            1 => &mut self.email,
            2 => &mut self.password,
            _ => &mut self.confirm_password,
        };
        route_key(&mut self.focus, field, key)
    }

    /// Mismatch is reported before length.
    pub fn validate(&self) -> Result<Registration, FormError> {
        if self.password.value != self.confirm_password.value {
            return Err(FormError::PasswordMismatch);
        }
        if self.password.value.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(FormError::PasswordTooShort);
        }
        Ok(Registration {
            name: self.name.value.trim().to_string(),
            email: self.email.value.trim().to_string(),
            password: self.password.value.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServer {
    pub name: String,
    pub ip: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddServerForm {
    pub name: TextField,
    pub ip: TextField,
    pub api_key: TextField,
    pub focus: Focus,
}

impl Default for AddServerForm {
    fn default() -> Self {
        Self {
            name: TextField::new("Server Name *"),
            ip: TextField::new("IP Address *"),
            api_key: TextField::new("API Key (Optional)"),
            focus: Focus::new(3),
        }
    }
}

impl AddServerForm {
    pub fn fields(&self) -> [&TextField; 3] {
        [&self.name, &self.ip, &self.api_key]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormInput {
        let field = match self.focus.index {
            0 => &mut self.name,
            1 => &mut self.ip,
            _ => &mut self.api_key,
        };
        route_key(&mut self.focus, field, key)
    }

    pub fn validate(&self) -> Result<NewServer, FormError> {
        let name = self.name.value.trim();
        let ip = self.ip.value.trim();
        if name.is_empty() {
            return Err(FormError::ServerNameRequired);
        }
        if ip.is_empty() {
            return Err(FormError::IpRequired);
        }
        if !is_ipv4_shape(ip) {
            return Err(FormError::InvalidIp);
        }
        let key = self.api_key.value.trim();
        Ok(NewServer {
            name: name.to_string(),
            ip: ip.to_string(),
            api_key: (!key.is_empty()).then(|| key.to_string()),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Four dot-separated groups of one to three ASCII digits. Octet range is not
/// checked.
pub fn is_ipv4_shape(s: &str) -> bool {
    let groups: Vec<&str> = s.split('.').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()))
}
