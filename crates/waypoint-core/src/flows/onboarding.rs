//! Host onboarding flow.
//!
//! Nine phases, 0 to 8. The overview (0) and the success screen (8) are part
//! of the same state machine but hide the navigation chrome; completing the
//! success screen ends the flow.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{StepDescriptor, StepId, StepTable},
    record::{overwrite, Patch, Record},
};

pub const FLOW_NAME: &str = "onboarding";

pub const OVERVIEW: StepId = 0;
pub const HOST_TYPE: StepId = 1;
pub const PERSONAL_INFO: StepId = 2;
pub const CONTACT: StepId = 3;
pub const IDENTITY: StepId = 4;
pub const BUSINESS: StepId = 5;
pub const PAYOUT: StepId = 6;
pub const AGREEMENT: StepId = 7;
pub const SUCCESS: StepId = 8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum HostType {
    Individual,
    Company,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum PayoutMethod {
    BankTransfer,
    Paypal,
}

/// Accumulated host profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct HostProfile {
    pub host_type: Option<HostType>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub id_document: Option<String>,
    pub company_name: Option<String>,
    pub registration_number: Option<String>,
    pub payout_method: Option<PayoutMethod>,
    pub payout_account: Option<String>,
    pub accepted_terms: Option<bool>,
}

/// Partial host profile contributed by one phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct HostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_type: Option<HostType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_method: Option<PayoutMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_terms: Option<bool>,
}

impl HostProfile {
    pub fn display_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            _ => None,
        }
    }

    pub fn is_company(&self) -> bool {
        self.host_type == Some(HostType::Company)
    }
}

impl Patch for HostPatch {}

impl Record for HostProfile {
    type Patch = HostPatch;

    const SCHEMA_VERSION: u32 = 1;

    fn merge(&mut self, patch: HostPatch) {
        overwrite(&mut self.host_type, patch.host_type);
        overwrite(&mut self.first_name, patch.first_name);
        overwrite(&mut self.last_name, patch.last_name);
        overwrite(&mut self.email, patch.email);
        overwrite(&mut self.phone, patch.phone);
        overwrite(&mut self.id_document, patch.id_document);
        overwrite(&mut self.company_name, patch.company_name);
        overwrite(&mut self.registration_number, patch.registration_number);
        overwrite(&mut self.payout_method, patch.payout_method);
        overwrite(&mut self.payout_account, patch.payout_account);
        overwrite(&mut self.accepted_terms, patch.accepted_terms);
    }
}

fn success_title(profile: &HostProfile) -> String {
    match profile.first_name.as_deref() {
        Some(name) if !name.is_empty() => format!("You're all set, {name}!"),
        _ => "You're all set!".to_string(),
    }
}

fn business_title(profile: &HostProfile) -> String {
    if profile.is_company() {
        "Business details".to_string()
    } else {
        "Business details (companies only)".to_string()
    }
}

/// Build the host onboarding step table.
pub fn table() -> Result<StepTable<HostProfile>> {
    StepTable::builder(FLOW_NAME)
        .step(
            StepDescriptor::new(OVERVIEW, "Become a host")
                .with_description("A few questions about you, then you're ready to list")
                .optional()
                .without_chrome(),
        )
        .step(
            StepDescriptor::new(HOST_TYPE, "How will you host?")
                .done_when(|p: &HostProfile| p.host_type.is_some()),
        )
        .step(
            StepDescriptor::new(PERSONAL_INFO, "Tell us about yourself")
                .done_when(|p: &HostProfile| p.display_name().is_some()),
        )
        .step(
            StepDescriptor::new(CONTACT, "How can guests reach you?")
                .done_when(|p: &HostProfile| p.email.is_some()),
        )
        .step(StepDescriptor::new(IDENTITY, "Verify your identity"))
        .step(StepDescriptor::derived(BUSINESS, business_title).optional())
        .step(StepDescriptor::new(PAYOUT, "How should we pay you?"))
        .step(
            StepDescriptor::new(AGREEMENT, "Hosting agreement")
                .done_when(|p: &HostProfile| p.accepted_terms == Some(true)),
        )
        .step(
            StepDescriptor::derived(SUCCESS, success_title)
                .optional()
                .without_chrome(),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::StepView, WizardBuilder};

    #[test]
    fn test_table_spans_zero_to_eight() {
        let table = table().unwrap();
        assert_eq!(table.len(), 9);
        assert_eq!(table.first_id(), OVERVIEW);
        assert_eq!(table.terminal_id(), SUCCESS);
    }

    #[test]
    fn test_chrome_hidden_on_overview_and_success() {
        let mut wizard = WizardBuilder::new(table().unwrap()).build();
        let view = wizard.view();
        assert!(!view.can_go_back);
        assert!(!view.can_go_forward);

        wizard.complete_step(OVERVIEW, HostPatch::default());
        let view = wizard.view();
        assert_eq!(view.current_step_id, HOST_TYPE);
        assert!(view.can_go_back);
        assert!(view.can_go_forward);

        for step in HOST_TYPE..SUCCESS {
            wizard.complete_step(step, HostPatch::default());
        }
        let view: StepView = wizard.view();
        assert_eq!(view.current_step_id, SUCCESS);
        assert!(view.is_terminal);
        assert!(!view.can_go_back);
        assert!(!view.can_go_forward);
    }

    #[test]
    fn test_success_title_greets_host() {
        let table = table().unwrap();
        let profile = HostProfile {
            first_name: Some("Ada".to_string()),
            ..HostProfile::default()
        };
        assert_eq!(
            table.get(SUCCESS).unwrap().title.resolve(&profile),
            "You're all set, Ada!"
        );
    }

    #[test]
    fn test_display_name() {
        let mut profile = HostProfile::default();
        assert_eq!(profile.display_name(), None);
        profile.merge(HostPatch {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            ..HostPatch::default()
        });
        assert_eq!(profile.display_name().as_deref(), Some("Ada Lovelace"));
    }
}
