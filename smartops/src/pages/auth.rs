use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Action, Route};
use crate::forms::{FormInput, LoginForm, RegisterForm};

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

#[derive(Default)]
pub struct LoginPage {
    pub form: LoginForm,
    pub error: Option<String>,
    pub submitting: bool,
}

impl LoginPage {
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.submitting {
            return Action::None;
        }
        if is_ctrl(&key, 'r') {
            return Action::Navigate(Route::Register);
        }
        match self.form.handle_key(key) {
            FormInput::Submit => {
                self.error = None;
                self.submitting = true;
                let (email, password) = self.form.credentials();
                Action::Login { email, password }
            }
            FormInput::Cancel => Action::Quit,
            _ => Action::None,
        }
    }

    pub fn failed(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }
}

#[derive(Default)]
pub struct RegisterPage {
    pub form: RegisterForm,
    pub error: Option<String>,
    pub submitting: bool,
}

impl RegisterPage {
    /// Local validation runs first; an invalid form never produces
    /// `Action::Register`.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.submitting {
            return Action::None;
        }
        if is_ctrl(&key, 'r') {
            return Action::Navigate(Route::Login);
        }
        match self.form.handle_key(key) {
            FormInput::Edited => {
                self.error = None;
                Action::None
            }
            FormInput::Submit => match self.form.validate() {
                Ok(reg) => {
                    self.error = None;
                    self.submitting = true;
                    Action::Register(reg)
                }
                Err(e) => {
                    self.error = Some(e.to_string());
                    Action::None
                }
            },
            FormInput::Cancel => Action::Navigate(Route::Login),
            _ => Action::None,
        }
    }

    pub fn failed(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }
}
