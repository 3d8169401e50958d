use image::{ImageBuffer, Rgb};
use std::error::Error;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn bmp_stego_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bmp_stego"))
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(bmp_stego_command().args(args).output()?)
}

#[test]
fn cli_encode_then_decode() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let carrier = dir.path().join("cover.bmp");
    let secret = dir.path().join("secret.txt");
    let stego = dir.path().join("stego.bmp");
    let recovered = dir.path().join("recovered.txt");

    ImageBuffer::from_fn(64, 64, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8])).save(&carrier)?;
    fs::write(&secret, b"hi")?;

    let encode = run(&[
        "encode",
        carrier.to_str().unwrap(),
        secret.to_str().unwrap(),
        stego.to_str().unwrap(),
    ])?;
    assert!(
        encode.status.success(),
        "encode command failed: {}",
        String::from_utf8_lossy(&encode.stderr)
    );
    assert!(String::from_utf8(encode.stdout)?.contains("successfully hidden"));

    let decode = run(&[
        "decode",
        stego.to_str().unwrap(),
        recovered.to_str().unwrap(),
        "--expect-ext",
        ".txt",
    ])?;
    assert!(
        decode.status.success(),
        "decode command failed: {}",
        String::from_utf8_lossy(&decode.stderr)
    );
    assert_eq!(fs::read(&recovered)?, b"hi");

    Ok(())
}

#[test]
fn cli_rejects_empty_magic_and_non_stego_input() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let plain = dir.path().join("plain.bmp");
    ImageBuffer::from_pixel(16, 16, Rgb([0u8, 0, 0])).save(&plain)?;

    let empty_magic = run(&["--magic", "", "decode", plain.to_str().unwrap()])?;
    assert!(!empty_magic.status.success());

    let not_stego = run(&["decode", plain.to_str().unwrap()])?;
    assert!(!not_stego.status.success());
    assert!(String::from_utf8_lossy(&not_stego.stderr).contains("Not a stego file"));
    assert!(!dir.path().join("decoded_secret").exists());

    Ok(())
}
