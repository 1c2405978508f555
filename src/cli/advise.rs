//! Advisory CLI command

use crate::advisory::Advisor;
use crate::config::{Locale, Settings};
use crate::services::Session;

/// Ask the advisor for a tip about the selected period
pub async fn handle_advise_command(session: &Session, settings: &Settings, advisor: &dyn Advisor) {
    let Some(request) = session.advisory_request() else {
        match settings.locale {
            Locale::PtBr => println!("Registre gastos neste mês para receber uma dica."),
            Locale::EnUs => println!("Record expenses this month to get a tip."),
        }
        return;
    };

    println!("{}", advisor.advise(&request).await);
}
