//! Department short codes used in digital numbers and attachment names.
//!
//! The table is a closed enumeration; the literal code values are part of
//! the externally visible identifier format and must not change. Departments
//! missing from the table get the synthetic code `DPT<id>`.

use crate::common::DepartmentId;

/// Fixed name-to-code mapping for the known municipal departments.
pub const DEPARTMENT_CODES: [(&str, &str); 9] = [
    ("Intendencia", "IN"),
    ("Mesa de Entrada", "ME"),
    ("Cultura", "CU"),
    ("Cementerio", "CE"),
    ("Obras Públicas", "OP"),
    ("Hacienda", "HA"),
    ("Administración", "AD"),
    ("Gobierno", "GO"),
    ("Prensa", "PR"),
];

/// Short code for a department, falling back to `DPT<id>` for departments
/// outside the fixed table. The fallback never contains hyphens, so the
/// hyphen-delimited digital number stays parseable.
pub fn department_code(name: &str, id: DepartmentId) -> String {
    DEPARTMENT_CODES
        .iter()
        .find(|(dept, _)| *dept == name)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or_else(|| format!("DPT{}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_departments_use_fixed_codes() {
        assert_eq!(department_code("Obras Públicas", DepartmentId::from_i64(5)), "OP");
        assert_eq!(department_code("Intendencia", DepartmentId::from_i64(2)), "IN");
    }

    #[test]
    fn unknown_department_gets_synthetic_code() {
        assert_eq!(department_code("Turismo", DepartmentId::from_i64(12)), "DPT12");
    }

    #[test]
    fn synthetic_code_has_no_hyphens() {
        let code = department_code("Defensa Civil", DepartmentId::from_i64(31));
        assert!(!code.contains('-'));
    }
}
