#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

/// QOI header: magic, width, height, channels, colorspace.
fn qoi_header(w: u32, h: u32, channels: u8) -> Vec<u8> {
    let mut out = b"qoif".to_vec();
    out.extend_from_slice(&w.to_be_bytes());
    out.extend_from_slice(&h.to_be_bytes());
    out.push(channels);
    out.push(0);
    out
}

const END: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_transcode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 RGBA via QOI_OP_RGBA
    let mut one = qoi_header(1, 1, 4);
    one.extend_from_slice(&[0xff, 0xff, 0x00, 0x00, 0xff]);
    one.extend_from_slice(&END);
    fs::write(format!("{dir}/qoi_1x1.qoi"), one).unwrap();

    // 8x8 RGB: one QOI_OP_RGB, then a run of 62 and a run of 1
    let mut flat = qoi_header(8, 8, 3);
    flat.extend_from_slice(&[0xfe, 0x20, 0x40, 0x60]);
    flat.push(0xc0 | 61);
    flat.push(0xc0);
    flat.extend_from_slice(&END);
    fs::write(format!("{dir}/qoi_flat_8x8.qoi"), flat).unwrap();

    // 2x200 tall strip (width clamps when scaled)
    let mut strip = qoi_header(2, 200, 4);
    for _ in 0..6 {
        strip.push(0xc0 | 61);
    }
    strip.push(0xc0 | 27);
    strip.extend_from_slice(&END);
    fs::write(format!("{dir}/qoi_strip_2x200.qoi"), strip).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"qoif").unwrap();
    fs::write(format!("{dir}/zero_dims.qoi"), qoi_header(0, 0, 4)).unwrap();
    fs::write(format!("{dir}/text.txt"), b"plain text is passed through\n").unwrap();

    println!("Generated seed corpus in {dir}/");
}
