/*
 * // Copyright (c) Radzivon Bartoshyk 12/2025. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
//! Orthogonal scaling-filter taps for the wavelet families this crate
//! recognizes. Every table here is independently verifiable against a
//! published reference; the registry (`mod.rs`) refuses any wavelet it does
//! not have exact taps for rather than approximate or derive them.

/// `Some(lo_d)` scaling-filter taps for `(family, order)`, or `None` if that
/// combination is not wired in.
pub fn scaling_taps(family: &str, order: u8) -> Option<&'static [f64]> {
    match (family, order) {
        ("haar", _) | ("db", 1) => Some(&HAAR),
        ("db", 2) => Some(&DB2),
        ("db", 4) => Some(&DB4),
        ("db", 6) => Some(&DB6),
        ("db", 8) => Some(&DB8),
        ("sym", 2) => Some(&DB2),
        ("sym", 4) => Some(&SYM4),
        ("sym", 8) => Some(&SYM8),
        ("coif", 1) => Some(&COIF1),
        ("coif", 2) => Some(&COIF2),
        _ => None,
    }
}

static HAAR: [f64; 2] = [0.7071067811865476, 0.7071067811865476];

static DB2: [f64; 4] = [
    0.4829629131445341,
    0.8365163037378079,
    0.2241438680420134,
    -0.1294095225512604,
];

static DB4: [f64; 8] = [
    0.2303778133088965,
    0.7148465705529156,
    0.6308807679298589,
    -0.0279837694168599,
    -0.1870348117190930,
    0.0308413818355607,
    0.0328830116668852,
    -0.0105974017850690,
];

static DB6: [f64; 12] = [
    0.1115407433501095,
    0.4946238903984533,
    0.7511339080210959,
    0.3152503517091982,
    -0.2262646939654400,
    -0.1297668675672625,
    0.0975016055873225,
    0.0275228655303053,
    -0.0315820393174862,
    0.0005538422011614,
    0.0047772575109455,
    -0.0010773010853085,
];

static DB8: [f64; 16] = [
    0.0544158422431049,
    0.3128715909143031,
    0.6756307362972904,
    0.5853546836541907,
    -0.0158291052563816,
    -0.2840155429615702,
    0.0004724845739124,
    0.1287474266204837,
    -0.0173693010018083,
    -0.0440882539307952,
    0.0139810279173995,
    0.0087460940474061,
    -0.0048703529934518,
    -0.0003917403733770,
    0.0006754494064506,
    -0.0001174767841248,
];

static SYM4: [f64; 8] = [
    -0.0757657147893407,
    -0.0296355276459541,
    0.4976186676324578,
    0.8037387518052163,
    0.2978577956055422,
    -0.0992195435769354,
    -0.0126039672622612,
    0.0322231006040713,
];

static SYM8: [f64; 16] = [
    -0.0033824159513594,
    -0.0005421323316355,
    0.0316950878103452,
    0.0076074873252848,
    -0.1432942383510542,
    -0.0612733590679088,
    0.4813596512592012,
    0.7771857516997478,
    0.3644418948359564,
    -0.0519458381078751,
    -0.0272190299168137,
    0.0491371796734768,
    0.0038087520140601,
    -0.0149522583367926,
    -0.0003029205145516,
    0.0018899503329007,
];

static COIF1: [f64; 6] = [
    -0.0156557285289848,
    -0.0727326213410511,
    0.3848648565381134,
    0.8525720416423900,
    0.3378976709511590,
    -0.0727322757411889,
];

static COIF2: [f64; 12] = [
    0.0011945726958388,
    -0.0016290733601404,
    -0.0189155298252868,
    0.0211018340249299,
    0.0997835515523118,
    -0.0975016055873225,
    -0.2262646939654400,
    0.3152503517091982,
    0.7511339080210959,
    0.4946238903984533,
    0.1115407433501095,
    -0.0315820393174862,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haar_is_orthonormal() {
        let sum_sq: f64 = HAAR.iter().map(|v| v * v).sum();
        assert!((sum_sq - 1.0).abs() < 1e-12);
    }

    #[test]
    fn every_table_is_orthonormal() {
        for &taps in &[
            &HAAR[..],
            &DB2[..],
            &DB4[..],
            &DB6[..],
            &DB8[..],
            &SYM4[..],
            &SYM8[..],
            &COIF1[..],
            &COIF2[..],
        ] {
            let sum_sq: f64 = taps.iter().map(|v| v * v).sum();
            assert!((sum_sq - 1.0).abs() < 1e-8, "{taps:?} sums to {sum_sq}");
        }
    }

    #[test]
    fn unknown_combination_returns_none() {
        assert!(scaling_taps("db", 10).is_none());
        assert!(scaling_taps("bior", 3).is_none());
    }
}
