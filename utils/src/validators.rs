use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
const LABEL_VALUE_MAX_LENGTH: usize = 63;
const TOTAL_ANNOTATION_SIZE_LIMIT: usize = 256 * 1024;

static DNS1123_SUBDOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("DNS-1123 subdomain pattern is valid")
});

static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$")
        .expect("qualified name pattern is valid")
});

/// Object names follow RFC 1123 subdomain rules.
pub fn validate_name(name: &str) -> Result<(), anyhow::Error> {
    if name.is_empty() {
        return Err(anyhow::anyhow!("Name must not be empty"));
    }
    if name.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        return Err(anyhow::anyhow!(
            "Name \"{}\" must be no more than {} characters",
            name,
            DNS1123_SUBDOMAIN_MAX_LENGTH
        ));
    }
    if !DNS1123_SUBDOMAIN.is_match(name) {
        return Err(anyhow::anyhow!(
            "Name \"{}\" must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character",
            name
        ));
    }
    Ok(())
}

/// Label and annotation keys: an optional DNS subdomain prefix followed by `/` and a name.
pub fn validate_qualified_name(key: &str) -> Result<(), anyhow::Error> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };

    if let Some(prefix) = prefix {
        if prefix.is_empty() {
            return Err(anyhow::anyhow!("Key \"{}\" has an empty prefix", key));
        }
        if prefix.len() > DNS1123_SUBDOMAIN_MAX_LENGTH || !DNS1123_SUBDOMAIN.is_match(prefix) {
            return Err(anyhow::anyhow!(
                "Key \"{}\" has an invalid prefix \"{}\": must be a DNS subdomain of at most {} characters",
                key,
                prefix,
                DNS1123_SUBDOMAIN_MAX_LENGTH
            ));
        }
    }

    if name.is_empty() {
        return Err(anyhow::anyhow!("Key \"{}\" has an empty name part", key));
    }
    if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        return Err(anyhow::anyhow!(
            "Key \"{}\" has a name part longer than {} characters",
            key,
            QUALIFIED_NAME_MAX_LENGTH
        ));
    }
    if !QUALIFIED_NAME.is_match(name) {
        return Err(anyhow::anyhow!(
            "Key \"{}\" must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character",
            key
        ));
    }
    Ok(())
}

fn validate_label_value(key: &str, value: &str) -> Result<(), anyhow::Error> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > LABEL_VALUE_MAX_LENGTH {
        return Err(anyhow::anyhow!(
            "Value of label \"{}\" must be no more than {} characters",
            key,
            LABEL_VALUE_MAX_LENGTH
        ));
    }
    if !QUALIFIED_NAME.is_match(value) {
        return Err(anyhow::anyhow!(
            "Value \"{}\" of label \"{}\" must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character",
            value,
            key
        ));
    }
    Ok(())
}

pub fn validate_label_map<'a, I>(labels: I) -> Result<(), anyhow::Error>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut errors = Vec::new();

    for (key, value) in labels {
        if let Err(e) = validate_qualified_name(key) {
            errors.push(e.to_string());
        }
        if let Err(e) = validate_label_value(key, value) {
            errors.push(e.to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(errors.join("; ")))
    }
}

pub fn validate_annotation_map<'a, I>(annotations: I) -> Result<(), anyhow::Error>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut errors = Vec::new();
    let mut total_size = 0;

    for (key, value) in annotations {
        total_size += key.len() + value.len();
        if let Err(e) = validate_qualified_name(key) {
            errors.push(e.to_string());
        }
    }

    if total_size > TOTAL_ANNOTATION_SIZE_LIMIT {
        errors.push(format!(
            "Annotations total {} bytes, which exceeds the limit of {} bytes",
            total_size, TOTAL_ANNOTATION_SIZE_LIMIT
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(errors.join("; ")))
    }
}

pub fn validate_base64(value: &str) -> Result<(), anyhow::Error> {
    base64::engine::general_purpose::STANDARD
        .decode(value)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("Value is not valid base64: {}", e))
}
