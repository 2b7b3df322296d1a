use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::{DecodeError, Engine};
use md5::Md5;
use sha2::{Digest, Sha256};

/// Encodes bytes as URL-safe base64 without `=` padding.
///
/// # Examples
/// ```
/// use utilkit::code::base64_url_encode;
///
/// assert_eq!(base64_url_encode(b"some text"), "c29tZSB0ZXh0");
/// assert_eq!(base64_url_encode([0xfbu8, 0xff]), "-_8");
/// ```
#[inline(always)]
pub fn base64_url_encode<T>(input: T) -> String
where
    T: AsRef<[u8]>,
{
    BASE64_URL_SAFE_NO_PAD.encode(input)
}

/// Decodes URL-safe base64 without padding. Padded input is rejected.
#[inline(always)]
pub fn base64_url_decode<T>(input: T) -> Result<Vec<u8>, DecodeError>
where
    T: AsRef<[u8]>,
{
    BASE64_URL_SAFE_NO_PAD.decode(input)
}

/// Hex-encoded MD5 digest. Only for checksums and cache keys, never for
/// anything security related.
#[inline(always)]
pub fn md5<T>(input: T) -> String
where
    T: AsRef<[u8]>,
{
    let hash = Md5::digest(input);
    format!("{hash:x}")
}

#[inline(always)]
pub fn sha256<T>(input: T) -> String
where
    T: AsRef<[u8]>,
{
    let hash = Sha256::digest(input);
    format!("{hash:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5() {
        assert_eq!(md5("123456"), "e10adc3949ba59abbe56e057f20f883e");
        assert_eq!(md5(""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_sha256() {
        assert_eq!(
            sha256("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_base64_url() {
        let data: Vec<u8> = vec![0xfb, 0xff, 0x00, 0x10];
        let encoded = base64_url_encode(&data);
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert_eq!(base64_url_decode(&encoded).unwrap(), data);

        // Standard alphabet and padding are not accepted.
        assert!(base64_url_decode("+/8=").is_err());
        assert!(base64_url_decode("c29tZQ==").is_err());
        assert!(base64_url_decode("not base64!").is_err());
    }
}
