//! Field rules for the usuario payloads.
//!
//! Wired into [`CreateUsuario`](crate::CreateUsuario) and
//! [`UpdateUsuario`](crate::UpdateUsuario) through `#[validate(custom(...))]`.
//! They run before any business rule or storage access.

use std::borrow::Cow;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::age::{idade_em, today_utc};
use crate::constants::*;

static TELEFONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(TELEFONE_PATTERN).expect("telefone pattern is a valid regex"));

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_nome(nome: &str) -> Result<(), ValidationError> {
    let nome = nome.trim();
    if nome.is_empty() {
        return Err(error("required", MSG_NOME_OBRIGATORIO));
    }
    let len = nome.chars().count();
    if !(MIN_NOME_LENGTH..=MAX_NOME_LENGTH).contains(&len) {
        return Err(error("length", MSG_NOME_TAMANHO));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(error("required", MSG_EMAIL_OBRIGATORIO));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(error("length", MSG_EMAIL_TAMANHO));
    }
    if !email.validate_email() {
        return Err(error("email", MSG_EMAIL_INVALIDO));
    }
    Ok(())
}

/// Create only.
pub fn validate_senha(senha: &str) -> Result<(), ValidationError> {
    if senha.is_empty() {
        return Err(error("required", MSG_SENHA_OBRIGATORIA));
    }
    if senha.chars().count() < MIN_SENHA_LENGTH {
        return Err(error("length", MSG_SENHA_TAMANHO));
    }
    Ok(())
}

pub fn validate_maioridade(data_nascimento: &NaiveDate) -> Result<(), ValidationError> {
    if idade_em(*data_nascimento, today_utc()) < MIN_AGE_YEARS {
        return Err(error("underage", MSG_MENOR_DE_IDADE));
    }
    Ok(())
}

/// Blank values are treated as absent and pass.
pub fn validate_telefone(telefone: &str) -> Result<(), ValidationError> {
    let telefone = telefone.trim();
    if telefone.is_empty() || TELEFONE_REGEX.is_match(telefone) {
        return Ok(());
    }
    Err(error("format", MSG_TELEFONE_FORMATO))
}

/// Flatten validator output into `(field, message)` pairs, with field names
/// as they appear in the JSON payload. Sorted by field for stable output.
pub fn field_messages(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(field);
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field.clone(), message)
            })
        })
        .collect();
    messages.sort();
    messages
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
