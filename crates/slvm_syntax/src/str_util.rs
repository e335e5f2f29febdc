/// Strip surrounding double quotes and resolve escapes.
pub fn unquote(s: &str) -> String {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
        unescape(&s[1..bytes.len() - 1])
    } else {
        s.to_string()
    }
}

pub fn unescape(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            res.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => res.push('\n'),
            Some('r') => res.push('\r'),
            Some('t') => res.push('\t'),
            Some('\\') => res.push('\\'),
            Some('"') => res.push('"'),
            Some(next) => {
                res.push('\\');
                res.push(next);
            }
            None => res.push('\\'),
        }
    }
    res
}
