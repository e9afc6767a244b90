//! Block representation and text framing.

/// Eight payload bytes read as a big-endian word.
pub type Block = u64;

const BLOCK_BYTES: usize = 8;

/// Splits raw bytes into big-endian blocks, zero-padding the last one.
pub fn bytes_to_blocks(data: &[u8]) -> Vec<Block> {
    data.chunks(BLOCK_BYTES)
        .map(|chunk| {
            let mut bytes = [0u8; BLOCK_BYTES];
            bytes[..chunk.len()].copy_from_slice(chunk);
            Block::from_be_bytes(bytes)
        })
        .collect()
}

/// Frames UTF-8 text into blocks. Empty text yields no blocks.
pub fn text_to_blocks(text: &str) -> Vec<Block> {
    bytes_to_blocks(text.as_bytes())
}

/// Concatenates blocks as big-endian bytes and strips every trailing zero byte.
///
/// The strip is not limited to padding, so payloads that end in NUL lose
/// those bytes.
pub fn blocks_to_bytes(blocks: &[Block]) -> Vec<u8> {
    let mut data: Vec<u8> = blocks.iter().flat_map(|b| b.to_be_bytes()).collect();
    let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    data.truncate(end);
    data
}

/// Reassembles text from blocks, dropping invalid UTF-8 sequences.
pub fn blocks_to_text(blocks: &[Block]) -> String {
    decode_dropping_invalid(&blocks_to_bytes(blocks))
}

fn decode_dropping_invalid(mut data: &[u8]) -> String {
    let mut text = String::with_capacity(data.len());
    loop {
        match std::str::from_utf8(data) {
            Ok(valid) => {
                text.push_str(valid);
                return text;
            }
            Err(err) => {
                let (valid, rest) = data.split_at(err.valid_up_to());
                // valid_up_to marks a char boundary, so this cannot fail
                if let Ok(valid) = std::str::from_utf8(valid) {
                    text.push_str(valid);
                }
                match err.error_len() {
                    Some(len) => data = &rest[len..],
                    // truncated sequence at the end of input
                    None => return text,
                }
            }
        }
    }
}
