//! Prompt text and fallback messages

use crate::config::Locale;

use super::AdvisoryRequest;

/// Number of consolidated groups included in a prompt
pub const TOP_GROUPS: usize = 5;

/// Shown when the model answers with no text
pub fn keep_tracking_message(locale: Locale) -> &'static str {
    match locale {
        Locale::PtBr => "Continue acompanhando seus gastos para manter a saúde financeira!",
        Locale::EnUs => "Keep tracking your spending to stay financially healthy!",
    }
}

/// Shown when the advisory call fails for any reason
pub fn stay_focused_message(locale: Locale) -> &'static str {
    match locale {
        Locale::PtBr => "Mantenha o foco nos seus objetivos financeiros!",
        Locale::EnUs => "Stay focused on your financial goals!",
    }
}

struct PromptLabels {
    instruction: &'static str,
    context: &'static str,
    budget: &'static str,
    spent: &'static str,
    remaining: &'static str,
    top: &'static str,
}

fn labels(locale: Locale) -> PromptLabels {
    match locale {
        Locale::PtBr => PromptLabels {
            instruction: "Analise brevemente este resumo financeiro e dê um conselho curto e \
                          prático (máximo 2 frases) para economizar ou gerenciar melhor o \
                          dinheiro. Seja amigável e direto.",
            context: "Contexto:",
            budget: "Orçamento Total",
            spent: "Total Gasto",
            remaining: "Saldo Restante",
            top: "Top 5 Gastos Consolidados:",
        },
        Locale::EnUs => PromptLabels {
            instruction: "Briefly analyze this financial summary and give one short, practical \
                          tip (2 sentences at most) to save or manage money better. Be friendly \
                          and direct.",
            context: "Context:",
            budget: "Total Budget",
            spent: "Total Spent",
            remaining: "Remaining Balance",
            top: "Top 5 Consolidated Expenses:",
        },
    }
}

/// Build the text sent to the model
pub fn build_prompt(request: &AdvisoryRequest, locale: Locale) -> String {
    let labels = labels(locale);
    let mut lines = vec![
        labels.instruction.to_string(),
        labels.context.to_string(),
        format!("{}: {}", labels.budget, locale.format_money(request.budget)),
        format!("{}: {}", labels.spent, locale.format_money(request.spent)),
        format!("{}: {}", labels.remaining, locale.format_money(request.remaining())),
        labels.top.to_string(),
    ];
    lines.extend(
        request
            .top_groups()
            .iter()
            .map(|group| format!("- {}: {}", group.description, locale.format_money(group.total))),
    );

    let mut prompt = lines.join("\n");
    prompt.push('\n');
    prompt
}
