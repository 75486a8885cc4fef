//! Built-in brand rules.
//!
//! Rules are listed in registry order. Identification is first-match, so the
//! order decides overlapping BIN ranges:
//!
//! - Visa shadows Elo's `4…` BINs,
//! - Discover shadows Elo's `65…` BINs,
//! - Elo shadows Aura on 504175, 506699, 506700-506779 and 509000.
//!
//! The shadowed ranges still match their own rule through
//! [`BrandRule::matches`]; they are just never reported by identification
//! unless the rules are re-ordered in a custom registry.

use crate::brand::{BrandId, BrandRule};

/// One row of the built-in table.
struct BuiltinRule {
    id: BrandId,
    pattern: &'static str,
    display_name: &'static str,
    allowed_lengths: &'static [usize],
}

const BUILTIN_RULES: [BuiltinRule; 9] = [
    BuiltinRule {
        id: BrandId::VISA,
        pattern: r"^4[0-9]{12,18}$",
        display_name: "Visa",
        allowed_lengths: &[13, 16, 19],
    },
    BuiltinRule {
        id: BrandId::MASTERCARD,
        pattern: r"^(?:5[1-5][0-9]{2}|222[1-9]|22[3-9][0-9]|2[3-6][0-9]{2}|27[01][0-9]|2720)[0-9]{12}$",
        display_name: "Mastercard",
        allowed_lengths: &[16],
    },
    BuiltinRule {
        id: BrandId::AMERICAN_EXPRESS,
        pattern: r"^3[47][0-9]{13}$",
        display_name: "American Express",
        allowed_lengths: &[15],
    },
    BuiltinRule {
        id: BrandId::DISCOVER,
        pattern: r"^6(?:011|5[0-9]{2})[0-9]{12}$",
        display_name: "Discover",
        allowed_lengths: &[16],
    },
    BuiltinRule {
        id: BrandId::DINERS,
        pattern: r"^3(?:0[0-5]|[68][0-9])[0-9]{11}$",
        display_name: "Diners Club",
        allowed_lengths: &[14],
    },
    BuiltinRule {
        id: BrandId::JCB,
        pattern: r"^(?:2131|1800|35[0-9]{3})[0-9]{11}$",
        display_name: "JCB",
        allowed_lengths: &[15, 16],
    },
    BuiltinRule {
        id: BrandId::ELO,
        pattern: concat!(
            r"^(?:40017[89]|431274|438935|451633|451331|457763",
            r"|504175|506699|5067[0-7][0-9]|509000",
            r"|627780|636297|636368",
            r"|650[45][0-9]{2}|6509[0-9]{2}|6515[01][0-9]|6516[56][0-9]|6550[01][0-9]",
            r")[0-9]{10}$"
        ),
        display_name: "Elo",
        allowed_lengths: &[16],
    },
    BuiltinRule {
        id: BrandId::HIPERCARD,
        pattern: r"^(?:384100|384140|384160)[0-9]{10}$",
        display_name: "Hipercard",
        allowed_lengths: &[16],
    },
    BuiltinRule {
        id: BrandId::AURA,
        pattern: r"^50(?:4175|6699|67[0-8][0-9]|9(?:[012][0-9]|3[0-8])[0-9])[0-9]{10}$",
        display_name: "Aura",
        allowed_lengths: &[16],
    },
];

/// Compiles the built-in rules in registry order.
pub(crate) fn rules() -> Vec<BrandRule> {
    BUILTIN_RULES
        .iter()
        .filter_map(|row| {
            match BrandRule::new(
                row.id.clone(),
                row.pattern,
                row.display_name,
                row.allowed_lengths.iter().copied(),
            ) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    // Patterns are literals covered by tests; this is unreachable in practice.
                    tracing::error!(brand = %row.id, error = %e, "built-in brand rule failed to compile");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &BrandId) -> BrandRule {
        rules()
            .into_iter()
            .find(|r| r.id() == id)
            .unwrap()
    }

    #[test]
    fn test_all_builtins_compile() {
        let compiled = rules();
        assert_eq!(compiled.len(), BUILTIN_RULES.len());
        let ids: Vec<&str> = compiled.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(
            ids,
            ["visa", "mastercard", "amex", "discover", "diners", "jcb", "elo", "hipercard", "aura"]
        );
    }

    #[test]
    fn test_visa_pattern() {
        let visa = rule(&BrandId::VISA);
        assert!(visa.matches("4222222222222"));
        assert!(visa.matches("4532015112830366"));
        assert!(visa.matches("4111111111111111110"));
        // 15 digits still match so the length policy can reject them.
        assert!(visa.matches("411111111111116"));
        assert!(!visa.matches("411111111111"));
        assert!(!visa.matches("41111111111111111111"));
        assert!(!visa.matches("5111111111111111"));
    }

    #[test]
    fn test_mastercard_pattern() {
        let mc = rule(&BrandId::MASTERCARD);
        assert!(mc.matches("5105105105105100"));
        assert!(mc.matches("5555555555554444"));
        assert!(mc.matches("2221000000000009"));
        assert!(mc.matches("2720000000000005"));
        assert!(!mc.matches("2220000000000000"));
        assert!(!mc.matches("2721000000000000"));
        assert!(!mc.matches("5000000000000000"));
        assert!(!mc.matches("5600000000000000"));
    }

    #[test]
    fn test_amex_pattern() {
        let amex = rule(&BrandId::AMERICAN_EXPRESS);
        assert!(amex.matches("378282246310005"));
        assert!(amex.matches("345678901234564"));
        assert!(!amex.matches("3782822463100050"));
        assert!(!amex.matches("358282246310005"));
    }

    #[test]
    fn test_discover_pattern() {
        let discover = rule(&BrandId::DISCOVER);
        assert!(discover.matches("6011111111111117"));
        assert!(discover.matches("6500000000000002"));
        assert!(!discover.matches("6012111111111117"));
        assert!(!discover.matches("6445644564456445"));
    }

    #[test]
    fn test_diners_pattern() {
        let diners = rule(&BrandId::DINERS);
        assert!(diners.matches("30569309025904"));
        assert!(diners.matches("36000000000008"));
        assert!(diners.matches("38000000000006"));
        assert!(!diners.matches("30600000000000"));
        assert!(!diners.matches("3056930902590400"));
    }

    #[test]
    fn test_jcb_pattern() {
        let jcb = rule(&BrandId::JCB);
        assert!(jcb.matches("3530111333300000"));
        assert!(jcb.matches("3566002020360505"));
        assert!(jcb.matches("213100000000001"));
        assert!(jcb.matches("180000000000002"));
        assert!(!jcb.matches("2131000000000010"));
    }

    #[test]
    fn test_elo_bin_ranges() {
        let elo = rule(&BrandId::ELO);
        for bin in [
            "400178", "400179", "431274", "438935", "451633", "451331", "457763", "504175",
            "506699", "506700", "506779", "509000", "627780", "636297", "636368", "650400",
            "650599", "650900", "651500", "651519", "651650", "651669", "655000", "655019",
        ] {
            let number = format!("{}0000000000", bin);
            assert!(elo.matches(&number), "Elo should match BIN {}", bin);
        }
        for bin in ["506780", "509001", "650300", "650600", "651520", "651640", "655020"] {
            let number = format!("{}0000000000", bin);
            assert!(!elo.matches(&number), "Elo should not match BIN {}", bin);
        }
        assert!(!elo.matches("504175000000000"));
    }

    #[test]
    fn test_hipercard_pattern() {
        let hipercard = rule(&BrandId::HIPERCARD);
        assert!(hipercard.matches("3841000000000007"));
        assert!(hipercard.matches("3841401234567896"));
        assert!(hipercard.matches("3841600000000000"));
        assert!(!hipercard.matches("3841200000000000"));
        assert!(!hipercard.matches("384100000000000000"));
    }

    #[test]
    fn test_aura_pattern() {
        let aura = rule(&BrandId::AURA);
        assert!(aura.matches("5041750000000000"));
        assert!(aura.matches("5066990000000000"));
        assert!(aura.matches("5067800000000002"));
        assert!(aura.matches("5091000000000009"));
        assert!(aura.matches("5093800000000000"));
        assert!(!aura.matches("5093900000000000"));
        assert!(!aura.matches("5069000000000000"));
    }
}
