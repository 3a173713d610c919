/// The authenticated user of this process, never persisted
#[derive(Debug, Default, Clone)]
pub struct Session {
    current_user_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, user_id: &str) {
        self.current_user_id = Some(user_id.to_string());
    }

    pub fn end(&mut self) {
        self.current_user_id = None;
    }

    pub fn current_user_id(&self) -> Option<&str> {
        self.current_user_id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user_id.is_some()
    }

    /// Whether `user_id` is the logged-in user
    pub fn is(&self, user_id: &str) -> bool {
        self.current_user_id.as_deref() == Some(user_id)
    }
}
