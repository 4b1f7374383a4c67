use crate::utils::error::{ProvisionError, Result};
use std::net::Ipv4Addr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Rejects values still carrying a `${VAR}` placeholder, which is what an
/// unset variable leaves behind after substitution.
pub fn validate_resolved(field_name: &str, value: &str) -> Result<()> {
    if let Some(start) = value.find("${") {
        if value[start..].contains('}') {
            return Err(ProvisionError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Contains an unresolved ${...} placeholder; is the variable set?"
                    .to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Ports stay strings all the way to the collaborator; this only checks that
/// the string would be a usable TCP port.
pub fn validate_port(field_name: &str, port: &str) -> Result<()> {
    parse_port(field_name, port).map(|_| ())
}

pub fn parse_port(field_name: &str, port: &str) -> Result<u16> {
    let parsed: u16 = port
        .parse()
        .map_err(|_| ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: port.to_string(),
            reason: "Port must be a number between 1 and 65535".to_string(),
        })?;
    validate_range(field_name, parsed, 1, u16::MAX)?;
    Ok(parsed)
}

pub fn validate_cidr(field_name: &str, cidr: &str) -> Result<()> {
    let invalid = |reason: &str| ProvisionError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: cidr.to_string(),
        reason: reason.to_string(),
    };

    let (addr, prefix) = cidr
        .split_once('/')
        .ok_or_else(|| invalid("Expected <address>/<prefix>"))?;

    addr.parse::<Ipv4Addr>()
        .map_err(|_| invalid("Invalid IPv4 address"))?;

    let prefix: u8 = prefix
        .parse()
        .map_err(|_| invalid("Prefix length must be a number"))?;
    if prefix > 32 {
        return Err(invalid("Prefix length must be between 0 and 32"));
    }

    Ok(())
}

pub fn validate_paired_lengths(field_name: &str, left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(ProvisionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{} branches / {} subnets", left, right),
            reason: "Every branch needs exactly one subnet at the same index".to_string(),
        });
    }
    Ok(())
}
