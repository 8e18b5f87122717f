use crate::config::{Config, Strategy};

/// Rules of the expression language, one display line each.
pub const FEATURES: &[&str] = &[
    "* Basic operations: addition (+), subtraction (-), multiplication (*) and division (/),",
    "    with the usual precedence and left associativity. \"4-3*5\" is evaluated as 4-(3*5)",
    "* Nesting with parentheses, and negation with unary minus, such as in \"-5\"",
    "* Chained signs are allowed as long as none of them is * or / . Examples:",
    "      \"+--+-5\" : evaluates to -5",
    "      \"-8*+--4\" : evaluates to -8*4",
    "      \"+++9/+(--7)\" : evaluates to 9/7",
    "      \"4*/6\" : invalid, / cannot be a sign",
    "* No trailing operators without a right operand, such as in \"7+\" or \"(7+)6\" or \"4/4*4*\"",
    "* Parentheses next to numbers or other parentheses multiply:",
    "      \"2(1/2)4(5-7)(0+1)\" is evaluated as \"2*(1/2)*4*(5-7)*(0+1)\"",
    "* Division by zero is reported, whether written literally (\"5/0\") or computed (\"1/(2-2)\")",
];

/// Describes the active ceilings in words.
pub fn limits_line(config: &Config) -> String {
    let limits = config.limits();
    match config.strategy() {
        Strategy::ExactFraction => format!(
            "* Exact fractions: numerators and denominators up to {} digits",
            limits.max_digits
        ),
        Strategy::Scientific => format!(
            "* Scientific values: {} significant digits, magnitudes up to 10 ^ {}",
            limits.max_digits, limits.max_magnitude
        ),
    }
}

/// Strategy and ceilings in a few words, for status lines.
pub fn ceiling_note(config: &Config) -> String {
    let limits = config.limits();
    match config.strategy() {
        Strategy::ExactFraction => format!("exact, {} digits", limits.max_digits),
        Strategy::Scientific => format!(
            "scientific, {} digits, 10^±{}",
            limits.max_digits, limits.max_magnitude
        ),
    }
}

/// The whole feature list for `config`, ready to print.
pub fn feature_lines(config: &Config) -> Vec<String> {
    FEATURES
        .iter()
        .map(|line| line.to_string())
        .chain(std::iter::once(limits_line(config)))
        .collect()
}
