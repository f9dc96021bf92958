use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::repository::{ContactMessageRecord, LeadNotification, LoanApplicationRecord};

pub const LOAN_APPLICATION_TEMPLATE: &str = "loan_application";
pub const CONTACT_MESSAGE_TEMPLATE: &str = "contact_message";

/// Render the mailbox notification for a stored loan application.
pub fn loan_application_notification(
    record: &LoanApplicationRecord,
    recipient: &str,
) -> LeadNotification {
    let application = &record.application;
    let applicant = &application.applicant;
    let view = record.simulation.view();
    let phone = &applicant.phone;

    let mut details = BTreeMap::new();
    details.insert("name".to_string(), applicant.full_name());
    details.insert("email".to_string(), applicant.email.clone());
    details.insert("phone".to_string(), phone.clone());
    details.insert("loan_amount".to_string(), format_euros(application.loan_amount));
    details.insert(
        "loan_duration".to_string(),
        format!("{} mois", application.loan_duration),
    );
    details.insert(
        "loan_purpose".to_string(),
        application.loan_purpose.display_name().to_string(),
    );
    details.insert(
        "employment_status".to_string(),
        application.employment_status.display_name().to_string(),
    );
    details.insert(
        "monthly_income".to_string(),
        format_euros(application.monthly_income),
    );
    details.insert(
        "monthly_payment".to_string(),
        format_euros(view.amortization.monthly_payment),
    );
    details.insert(
        "total_interest".to_string(),
        format_euros(view.amortization.total_interest),
    );
    if let Some(eligibility) = view.eligibility {
        details.insert(
            "eligibility".to_string(),
            eligibility.tier.label().to_string(),
        );
        details.insert(
            "debt_to_income_ratio".to_string(),
            format!("{:.2}%", eligibility.debt_to_income_ratio_percent),
        );
    }

    let mut body = String::new();
    let _ = writeln!(body, "Nouvelle demande de prêt ({})", application.id.0);
    let _ = writeln!(body);
    let _ = writeln!(body, "Informations personnelles");
    let _ = writeln!(body, "  Nom: {}", applicant.full_name());
    let _ = writeln!(body, "  Email: {}", applicant.email);
    let _ = writeln!(body, "  Téléphone: {phone}");
    let _ = writeln!(body);
    let _ = writeln!(body, "Détails du prêt");
    let _ = writeln!(body, "  Montant: {}", details["loan_amount"]);
    let _ = writeln!(body, "  Durée: {}", details["loan_duration"]);
    let _ = writeln!(body, "  Objectif: {}", details["loan_purpose"]);
    let _ = writeln!(body);
    let _ = writeln!(body, "Situation professionnelle");
    let _ = writeln!(body, "  Situation: {}", details["employment_status"]);
    let _ = writeln!(body, "  Revenu mensuel: {}", details["monthly_income"]);
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "Simulation (taux annuel {:.2} %)",
        view.annual_rate_percent
    );
    let _ = writeln!(body, "  Mensualité: {}", details["monthly_payment"]);
    let _ = writeln!(body, "  Intérêts totaux: {}", details["total_interest"]);
    let _ = writeln!(
        body,
        "  Coût total: {}",
        format_euros(view.amortization.total_cost)
    );
    if let Some(eligibility) = view.eligibility {
        let _ = writeln!(body, "  Éligibilité: {}", eligibility.tier.label());
        let _ = writeln!(
            body,
            "  Ratio dette/revenu: {:.2}%",
            eligibility.debt_to_income_ratio_percent
        );
    }

    LeadNotification {
        template: LOAN_APPLICATION_TEMPLATE.to_string(),
        submission_id: application.id.clone(),
        recipient: recipient.to_string(),
        reply_to: applicant.email.clone(),
        subject: "Nouvelle demande de prêt".to_string(),
        body,
        details,
    }
}

/// Render the mailbox notification for a stored contact message.
pub fn contact_message_notification(
    record: &ContactMessageRecord,
    recipient: &str,
) -> LeadNotification {
    let message = &record.message;

    let mut details = BTreeMap::new();
    details.insert("name".to_string(), message.name.clone());
    details.insert("email".to_string(), message.email.clone());
    details.insert(
        "subject".to_string(),
        message.subject.display_name().to_string(),
    );

    let body = format!(
        "Nouveau message de contact ({})\n\nDe: {} <{}>\nSujet: {}\n\n{}\n",
        message.id.0,
        message.name,
        message.email,
        message.subject.display_name(),
        message.message
    );

    LeadNotification {
        template: CONTACT_MESSAGE_TEMPLATE.to_string(),
        submission_id: message.id.clone(),
        recipient: recipient.to_string(),
        reply_to: message.email.clone(),
        subject: format!("Nouveau message de contact: {}", message.subject.display_name()),
        body,
        details,
    }
}

/// French currency formatting: `15 000,00 €`.
pub fn format_euros(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let units = (cents / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (index, digit) in units.chars().enumerate() {
        if index > 0 && (units.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped},{:02} €", cents % 100)
}
