use crate::error::CoreError;

/// The host's user-notification capability.
pub trait Notifier {
    /// Whether the user granted notification permission. Checked before every scan.
    fn permission_granted(&self) -> bool;

    /// Show a notification.
    fn notify(&self, title: &str, body: &str) -> Result<(), CoreError>;
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn permission_granted(&self) -> bool {
        (**self).permission_granted()
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), CoreError> {
        (**self).notify(title, body)
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn permission_granted(&self) -> bool {
        (**self).permission_granted()
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), CoreError> {
        (**self).notify(title, body)
    }
}

/// Notifier that keeps every delivered notification in memory.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub denied: bool,
    pub failing: bool,
    pub sent: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn bodies(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body.clone())
            .collect()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn permission_granted(&self) -> bool {
        !self.denied
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), CoreError> {
        if self.failing {
            return Err(CoreError::Notify("channel closed".into()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}
