//! Derives a key table, encrypts a message, and decrypts it back.

use psn_core::{select_initial_position, BlockCipher, KeyTable, Seeds};

fn main() {
    let seeds = Seeds::new(104_729, 1_299_709, 1_234_567_890_123_456_789);
    let table = KeyTable::generate_default(seeds);
    let message = "first block here, second block here";
    let psn = select_initial_position(message.as_bytes());

    let cipher = BlockCipher::new(table, psn);
    let ciphertext = cipher.encrypt_text(message);
    let recovered = cipher.decrypt_text(&ciphertext);
    assert_eq!(recovered, message);

    println!("psn: {psn}");
    for block in &ciphertext {
        println!("{block:#018x}");
    }
    println!("example succeeded; message recovered");
}
