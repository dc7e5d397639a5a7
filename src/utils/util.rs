/// Keeps the first and last `n` bytes of `input` and masks the rest with
/// `....`. Inputs of at most `2 * n` bytes are returned unchanged. Cut points
/// inside a multi-byte character move inwards to the nearest boundary.
pub fn obfuscate_string(
    input: &str,
    n: usize,
) -> String {
    if input.len() <= 2 * n {
        return input.to_string();
    }
    let mut head_end = n;
    while !input.is_char_boundary(head_end) {
        head_end -= 1;
    }
    let mut tail_start = input.len() - n;
    while !input.is_char_boundary(tail_start) {
        tail_start += 1;
    }
    format!("{}....{}", &input[..head_end], &input[tail_start..])
}
