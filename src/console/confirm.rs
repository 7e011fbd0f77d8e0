//! Confirmation step for destructive actions

/// A pending destructive action awaiting the operator's decision
///
/// Deletes are executed from a [`Confirmed`] token, which can only be
/// obtained through [`ConfirmDialog::confirm`]. Dropping or cancelling the
/// dialog performs nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog<Id> {
    resource: &'static str,
    ids: Vec<Id>,
    description: String,
}

/// A confirmed destructive action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmed<Id> {
    resource: &'static str,
    ids: Vec<Id>,
}

impl<Id> ConfirmDialog<Id> {
    pub fn new(resource: &'static str, ids: Vec<Id>, description: impl Into<String>) -> Self {
        Self {
            resource,
            ids,
            description: description.into(),
        }
    }

    /// Human-readable consequence shown to the operator
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Resource the action applies to (e.g. "bills")
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn confirm(self) -> Confirmed<Id> {
        Confirmed {
            resource: self.resource,
            ids: self.ids,
        }
    }

    pub fn cancel(self) {
        tracing::debug!(resource = self.resource, count = self.ids.len(), "delete cancelled");
    }
}

impl<Id> Confirmed<Id> {
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<Id> {
        self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_keeps_ids() {
        let dialog =
            ConfirmDialog::new("bills", vec![1, 2], "This will permanently delete 2 bills.");
        assert_eq!(dialog.description(), "This will permanently delete 2 bills.");
        assert_eq!(dialog.len(), 2);

        let confirmed = dialog.confirm();
        assert_eq!(confirmed.resource(), "bills");
        assert_eq!(confirmed.into_ids(), vec![1, 2]);
    }
}
