pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

pub fn is_blank(c: char) -> bool {
    c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_alphabet() {
        assert!("0123456789".chars().all(is_digit));
        assert!("+-*/".chars().all(is_operator));
        assert!(!is_digit('a') && !is_operator('^') && !is_operator('('));
        assert!(is_blank(' ') && is_blank('\t') && !is_blank('0'));
    }
}
