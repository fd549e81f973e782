use crate::{money::format_money, Recipient};

pub const DEFAULT_NAME: &str = "Estimado Cliente";
pub const PENDING_DATE: &str = "Pendiente";

/// Renders a reminder message for one recipient.
///
/// Tokens are matched case-insensitively and replaced everywhere in the
/// template, one token after another. Anything else between braces is left
/// untouched.
pub fn render_message(template: &str, recipient: &Recipient) -> String {
    let replacements = [
        ("{nombre}", recipient.name().unwrap_or(DEFAULT_NAME).to_string()),
        ("{telefono}", recipient.phone().unwrap_or_default().to_string()),
        ("{ciudad}", recipient.city().unwrap_or_default().to_string()),
        ("{monto}", format_money(recipient.amount())),
        ("{fecha}", recipient.date().unwrap_or(PENDING_DATE).to_string()),
    ];

    let mut message = template.to_string();
    for (token, value) in replacements.iter() {
        message = replace_ignore_ascii_case(&message, token, value);
    }
    message
}

// Only ascii is lowercased so byte offsets in `lower` are valid in `haystack`
fn replace_ignore_ascii_case(haystack: &str, token: &str, value: &str) -> String {
    let lower = haystack.to_ascii_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for (start, _) in lower.match_indices(token) {
        out.push_str(&haystack[last..start]);
        out.push_str(value);
        last = start + token.len();
    }
    out.push_str(&haystack[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient() -> Recipient {
        let mut recipient = Recipient::new("Ana", "+57 300 123 4567");
        recipient.ciudad = Some("Cali".into());
        recipient.monto = Some("150000".into());
        recipient.fecha = Some("2026-11-01".into());
        recipient
    }

    #[test]
    fn replaces_all_tokens() {
        let msg = render_message(
            "Hola {nombre} de {ciudad}, debes {monto} desde {fecha}. Tel: {telefono}",
            &recipient(),
        );
        assert_eq!(
            msg,
            "Hola Ana de Cali, debes $\u{a0}150.000 desde 2026-11-01. Tel: +57 300 123 4567"
        );
    }

    #[test]
    fn is_case_insensitive_and_global() {
        let msg = render_message("{NOMBRE} {Nombre} {nombre}", &recipient());
        assert_eq!(msg, "Ana Ana Ana");
    }

    #[test]
    fn uses_fallbacks_for_missing_fields() {
        let msg = render_message(
            "{nombre}|{telefono}|{ciudad}|{monto}|{fecha}",
            &Recipient::default(),
        );
        assert_eq!(msg, "Estimado Cliente|||$0|Pendiente");

        let mut birthday = Recipient::new("", "300");
        birthday.fecha_nacimiento = Some("1990-05-01".into());
        assert_eq!(
            render_message("{nombre} {fecha}", &birthday),
            "Estimado Cliente 1990-05-01"
        );
    }

    #[test]
    fn leaves_unknown_tokens_and_braces() {
        let template = "Hola {apellido} {nombre} {} {{x}}";
        let first = render_message(template, &recipient());
        assert_eq!(first, "Hola {apellido} Ana {} {{x}}");
        assert_eq!(first, render_message(template, &recipient()));
        assert_eq!(render_message("Sin tokens", &recipient()), "Sin tokens");
    }

    #[test]
    fn keeps_non_ascii_text_around_tokens() {
        let msg = render_message("¡Feliz cumpleaños, {NOMBRE}! ñandú", &recipient());
        assert_eq!(msg, "¡Feliz cumpleaños, Ana! ñandú");
    }
}
