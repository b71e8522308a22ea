use rand::Rng;

pub(crate) const JOIN_CODE_LEN: usize = 8;
const JOIN_CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Short human-typable course token. The charset skips easily-confused
/// characters (0/O, 1/I).
pub(crate) fn generate_join_code() -> String {
    let mut rng = rand::thread_rng();
    (0..JOIN_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..JOIN_CODE_CHARSET.len());
            JOIN_CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_eight_uppercase_alphanumerics() {
        for _ in 0..100 {
            let code = generate_join_code();
            assert_eq!(code.len(), JOIN_CODE_LEN);
            assert!(code
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn codes_vary() {
        let first = generate_join_code();
        let distinct = (0..50).any(|_| generate_join_code() != first);
        assert!(distinct);
    }
}
