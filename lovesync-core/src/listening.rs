/// Active-listening stopwatch. Something outside (the GUI frame clock) calls
/// [`ListeningTimer::tick`]; the timer only keeps the count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListeningTimer {
    is_listening: bool,
    elapsed_secs: u64,
}

impl ListeningTimer {
    pub fn start(&mut self) {
        self.is_listening = true;
        self.elapsed_secs = 0;
    }

    pub fn tick(&mut self, seconds: u64) {
        if self.is_listening {
            self.elapsed_secs = self.elapsed_secs.saturating_add(seconds);
        }
    }

    /// Stops the session and returns how long it lasted, in seconds.
    pub fn stop(&mut self) -> u64 {
        self.is_listening = false;
        self.elapsed_secs
    }

    pub fn is_listening(&self) -> bool {
        self.is_listening
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// `m:ss`
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }
}

/// Whole minutes a session lasted, rounded up.
pub fn duration_minutes(elapsed_secs: u64) -> u32 {
    u32::try_from(elapsed_secs.div_ceil(60)).unwrap_or(u32::MAX)
}
