use crate::encryption::Cryptogram;
use crate::group::{Point, Scalar};

/// Recovers the point `B - sk*A`.
///
/// There is no integrity check. A cryptogram keyed to a different private key
/// decrypts to an unrelated point without error; the mismatch only shows up
/// when [`crate::embedding::unembed`] rejects the result.
pub fn decrypt(sk: &Scalar, ct: &Cryptogram) -> Point {
    ct.b() - ct.a() * sk
}
