//! Demo-dashboard activation gate.
//!
//! Five seconds after first render (the shell owns the timer), an
//! unactivated profile gets a forced activation prompt: no close button,
//! backdrop clicks ignored. Gated actions attempted before that open a
//! dismissible prompt instead of performing the action. The prompt's
//! "Activate" button hands control back to the navigation controller; it
//! never marks activation itself.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Hidden,
    /// Opened by a gated action; the user may close it.
    Dismissible,
    /// Opened by the idle timeout; stays up until the user activates or
    /// navigates away entirely.
    Forced,
}

pub struct DashboardGate {
    activated: bool,
    prompt: PromptState,
}

impl DashboardGate {
    pub fn new(activated: bool) -> Self {
        DashboardGate {
            activated,
            prompt: PromptState::Hidden,
        }
    }

    pub fn prompt(&self) -> PromptState {
        self.prompt
    }

    /// The 5-second timer fired. Returns true when the forced prompt
    /// opened (activated profiles never see it).
    pub fn on_idle_timeout(&mut self) -> bool {
        if self.activated {
            return false;
        }
        self.prompt = PromptState::Forced;
        true
    }

    /// A gated action (top-up, withdraw, earning-hub tile, referral tile)
    /// was attempted. Returns true when the action may proceed; otherwise
    /// the prompt opens (dismissible, unless the forced one is already up).
    pub fn on_gated_action(&mut self) -> bool {
        if self.activated {
            return true;
        }
        if self.prompt == PromptState::Hidden {
            self.prompt = PromptState::Dismissible;
        }
        false
    }

    /// Close affordance / backdrop click. Only a dismissible prompt closes.
    pub fn dismiss(&mut self) -> bool {
        if self.prompt == PromptState::Dismissible {
            self.prompt = PromptState::Hidden;
            return true;
        }
        false
    }
}
