//! Loading encoded images into a buffer and dumping a buffer for debugging.

use std::fmt::Write;

use crate::error::ImageError;

/// Copy `image` into `memory` starting at address 0 and zero the rest.
pub fn load_image(memory: &mut [u8], image: &[u8]) -> Result<(), ImageError> {
    if image.len() > memory.len() {
        return Err(ImageError::TooLarge {
            image: image.len(),
            capacity: memory.len(),
        });
    }
    let (head, tail) = memory.split_at_mut(image.len());
    head.copy_from_slice(image);
    tail.fill(0);
    Ok(())
}

/// Render `memory` as a boxed address/value table, one row per byte.
pub fn dump(memory: &[u8]) -> String {
    let mut out = String::with_capacity(48 + memory.len() * 16);
    out.push_str("|============|\n");
    out.push_str("|   MEMORY   |\n");
    out.push_str("|============|\n");
    for (addr, byte) in memory.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "|{addr:#04x}:\t {byte:#04x}|");
    }
    out.push_str("|============|\n");
    out
}
