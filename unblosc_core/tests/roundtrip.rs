//! Frame round-trips: every buffer fed to the encoder must come back
//! byte-for-byte from the decoder, across compressors, shuffle settings,
//! block geometries, and the verbatim fallback. Corrupted frames must be
//! rejected before any partial output escapes.

use unblosc_codecs::{codec_by_id, Lz4Codec, ZlibCodec, ZstdCodec};
use unblosc_core::format::{
    compressor_name, COMPRESSOR_BLOSCLZ, COMPRESSOR_SNAPPY, HEADER_SIZE,
};
use unblosc_core::{
    decode_frame, encode_frame, BloscHeader, Codec, EncodeOptions, Error, ShuffleMode,
};

/// Generate `len` deterministic bytes using a simple LCG.
fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (rng >> 56) as u8
        })
        .collect()
}

/// Generate `count` little-endian u16 samples following a smooth ramp,
/// compressible the way real imaging chunks are.
fn ramp_u16_bytes(count: usize) -> Vec<u8> {
    (0..count)
        .flat_map(|i| ((i / 7) as u16).to_le_bytes())
        .collect()
}

fn roundtrip(raw: &[u8], codec: &dyn Codec, opts: &EncodeOptions) {
    let frame = encode_frame(raw, codec, opts).unwrap();
    let decoded = decode_frame(&frame, Some(codec)).unwrap();
    assert_eq!(
        decoded, raw,
        "{} typesize {} shuffle {} block {}",
        codec.name(),
        opts.typesize,
        opts.shuffle.name(),
        opts.block_size
    );
}

// ── round-trips ────────────────────────────────────────────────────────────

#[test]
fn roundtrip_lz4_shuffled_multi_block() {
    // Several full blocks plus a leftover; lz4 full blocks split into
    // per-byte streams while the trailing block stays whole.
    let raw = ramp_u16_bytes(3 * 32 * 1024 + 501);
    let opts = EncodeOptions {
        typesize: 2,
        shuffle: ShuffleMode::Byte,
        block_size: 64 * 1024,
    };
    roundtrip(&raw, &Lz4Codec, &opts);
}

#[test]
fn roundtrip_lz4_unshuffled() {
    let raw = ramp_u16_bytes(10_000);
    let opts = EncodeOptions {
        typesize: 2,
        shuffle: ShuffleMode::None,
        block_size: 16 * 1024,
    };
    roundtrip(&raw, &Lz4Codec, &opts);
}

#[test]
fn roundtrip_zstd_shuffled_f32_geometry() {
    let raw: Vec<u8> = (0..20_000u32)
        .flat_map(|i| ((i as f32).sqrt()).to_le_bytes())
        .collect();
    let opts = EncodeOptions {
        typesize: 4,
        shuffle: ShuffleMode::Byte,
        block_size: 32 * 1024,
    };
    roundtrip(&raw, &ZstdCodec::default(), &opts);
}

#[test]
fn roundtrip_zlib() {
    let raw = ramp_u16_bytes(40_000);
    let opts = EncodeOptions {
        typesize: 2,
        shuffle: ShuffleMode::Byte,
        block_size: 64 * 1024,
    };
    roundtrip(&raw, &ZlibCodec::default(), &opts);
}

#[test]
fn roundtrip_every_codec_single_small_block() {
    let raw = ramp_u16_bytes(300);
    let codecs: [&dyn Codec; 3] = [&Lz4Codec, &ZlibCodec::default(), &ZstdCodec::default()];
    for codec in codecs {
        for shuffle in [ShuffleMode::None, ShuffleMode::Byte] {
            let opts = EncodeOptions {
                typesize: 2,
                shuffle,
                block_size: 64 * 1024,
            };
            roundtrip(&raw, codec, &opts);
        }
    }
}

#[test]
fn roundtrip_input_shorter_than_one_element() {
    let raw = [7u8];
    let opts = EncodeOptions {
        typesize: 4,
        shuffle: ShuffleMode::Byte,
        block_size: 64 * 1024,
    };
    roundtrip(&raw, &Lz4Codec, &opts);
}

#[test]
fn incompressible_input_falls_back_to_verbatim() {
    let raw = pseudo_random_bytes(8 * 1024, 0xDEAD_BEEF);
    let frame = encode_frame(&raw, &Lz4Codec, &EncodeOptions::default()).unwrap();

    let (header, nbytes) = BloscHeader::validate(&frame).unwrap();
    assert!(header.is_memcpy(), "random data should be stored verbatim");
    assert_eq!(nbytes, raw.len());
    assert_eq!(frame.len(), HEADER_SIZE + raw.len());

    // A verbatim frame decodes with no codec at all.
    assert_eq!(decode_frame(&frame, None).unwrap(), raw);
}

#[test]
fn mixed_blocks_store_incompressible_streams() {
    // First block compresses, second is entropy-hard and is stored raw
    // inside a still-compressed frame.
    let mut raw = vec![0u8; 64 * 1024];
    raw.extend(pseudo_random_bytes(64 * 1024, 0x1234_5678));
    let opts = EncodeOptions {
        typesize: 1,
        shuffle: ShuffleMode::None,
        block_size: 64 * 1024,
    };
    let frame = encode_frame(&raw, &Lz4Codec, &opts).unwrap();
    let header = BloscHeader::from_bytes(&frame).unwrap();
    assert!(!header.is_memcpy());
    assert_eq!(decode_frame(&frame, Some(&Lz4Codec)).unwrap(), raw);
}

#[test]
fn roundtrip_empty_input() {
    let frame = encode_frame(&[], &Lz4Codec, &EncodeOptions::default()).unwrap();
    assert_eq!(decode_frame(&frame, None).unwrap(), Vec::<u8>::new());
}

// ── rejection ──────────────────────────────────────────────────────────────

#[test]
fn altered_version_byte_rejected() {
    let raw = ramp_u16_bytes(5_000);
    let mut frame = encode_frame(&raw, &Lz4Codec, &EncodeOptions::default()).unwrap();
    frame[0] = 0x7f;
    assert!(matches!(
        decode_frame(&frame, Some(&Lz4Codec)),
        Err(Error::Frame(_))
    ));
}

#[test]
fn truncated_frame_rejected() {
    let raw = ramp_u16_bytes(5_000);
    let mut frame = encode_frame(&raw, &Lz4Codec, &EncodeOptions::default()).unwrap();
    frame.pop();
    assert!(matches!(
        decode_frame(&frame, Some(&Lz4Codec)),
        Err(Error::Frame(_))
    ));
}

#[test]
fn truncation_hidden_by_patched_length_rejected() {
    // Shorten the payload and patch cbytes so the header still matches the
    // buffer; the cut now falls inside a compressed stream.
    let raw = ramp_u16_bytes(50_000);
    let mut frame = encode_frame(&raw, &Lz4Codec, &EncodeOptions::default()).unwrap();
    frame.truncate(frame.len() - 64);
    let patched = (frame.len() as u32).to_le_bytes();
    frame[12..16].copy_from_slice(&patched);
    assert!(decode_frame(&frame, Some(&Lz4Codec)).is_err());
}

#[test]
fn compressor_mismatch_rejected() {
    let raw = ramp_u16_bytes(5_000);
    let frame = encode_frame(&raw, &Lz4Codec, &EncodeOptions::default()).unwrap();
    let result = decode_frame(&frame, Some(&ZstdCodec::default()));
    match result {
        Err(Error::Codec(message)) => assert!(message.contains("mismatch"), "{message}"),
        other => panic!("expected a codec error, got {other:?}"),
    }
}

#[test]
fn compressed_frame_requires_a_codec() {
    let raw = ramp_u16_bytes(5_000);
    let frame = encode_frame(&raw, &Lz4Codec, &EncodeOptions::default()).unwrap();
    assert!(matches!(decode_frame(&frame, None), Err(Error::Codec(_))));
}

#[test]
fn unimplemented_compressors_resolve_to_an_error() {
    for code in [COMPRESSOR_BLOSCLZ, COMPRESSOR_SNAPPY] {
        match codec_by_id(code) {
            Err(Error::Codec(message)) => {
                assert!(message.contains(compressor_name(code)), "{message}")
            }
            other => panic!("expected a codec error for code {code}, got {:?}", other.map(|c| c.name())),
        }
    }
}

#[test]
fn codec_by_id_matches_frame_headers() {
    let raw = ramp_u16_bytes(2_000);
    let codecs: [&dyn Codec; 3] = [&Lz4Codec, &ZlibCodec::default(), &ZstdCodec::default()];
    for codec in codecs {
        let opts = EncodeOptions {
            typesize: 2,
            shuffle: ShuffleMode::Byte,
            block_size: 64 * 1024,
        };
        let frame = encode_frame(&raw, codec, &opts).unwrap();
        let header = BloscHeader::from_bytes(&frame).unwrap();
        let resolved = codec_by_id(header.compressor()).unwrap();
        assert_eq!(resolved.id(), codec.id());
        assert_eq!(decode_frame(&frame, Some(resolved.as_ref())).unwrap(), raw);
    }
}
