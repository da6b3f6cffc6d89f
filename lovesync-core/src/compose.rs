/// Compose sub-view: `Idle` until the user opens the form, `Composing` while a
/// draft is being written. `C` carries whatever the form was opened for (a
/// check-in prompt, for instance).
#[derive(Debug, Clone, PartialEq)]
pub enum Composer<C = ()> {
    Idle,
    Composing { draft: String, context: C },
}

impl<C> Default for Composer<C> {
    fn default() -> Self {
        Composer::Idle
    }
}

impl<C> Composer<C> {
    pub fn start_with(&mut self, context: C) {
        *self = Composer::Composing {
            draft: String::new(),
            context,
        };
    }

    /// Discards the draft.
    pub fn cancel(&mut self) {
        *self = Composer::Idle;
    }

    pub fn is_composing(&self) -> bool {
        matches!(self, Composer::Composing { .. })
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            Composer::Composing { draft, .. } => Some(draft),
            Composer::Idle => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut String> {
        match self {
            Composer::Composing { draft, .. } => Some(draft),
            Composer::Idle => None,
        }
    }

    pub fn context(&self) -> Option<&C> {
        match self {
            Composer::Composing { context, .. } => Some(context),
            Composer::Idle => None,
        }
    }

    /// Draft and context together, for forms editing both in one pass.
    pub fn fields_mut(&mut self) -> Option<(&mut String, &mut C)> {
        match self {
            Composer::Composing { draft, context } => Some((draft, context)),
            Composer::Idle => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.draft().is_some_and(|draft| !draft.trim().is_empty())
    }

    /// Hands back the draft and context and returns to `Idle`. A blank draft
    /// keeps the form open and yields nothing.
    pub fn submit(&mut self) -> Option<(String, C)> {
        if !self.can_submit() {
            return None;
        }
        match std::mem::take(self) {
            Composer::Composing { draft, context } => Some((draft, context)),
            Composer::Idle => None,
        }
    }
}

impl Composer<()> {
    pub fn start(&mut self) {
        self.start_with(());
    }
}
