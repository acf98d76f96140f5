use dnabin2fastq::{
    Base, BaseReading, ConvertError, ConvertOptions, Fragment, FragmentReader, FragmentWriter,
    QualityScore, ValidationError,
};
use std::io::{self, BufRead, Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn reader_over(bytes: Vec<u8>, fragment_len: usize) -> FragmentReader {
    FragmentReader::from_bufread(
        Cursor::new(bytes),
        ConvertOptions::with_fragment_len(fragment_len),
    )
}

#[test]
fn every_byte_round_trips_through_the_codec() {
    for b in 0u8..=255 {
        let reading = BaseReading::from_byte(b);
        assert_eq!(reading.to_byte(), b, "byte {b:#010b}");
    }
}

#[test]
fn base_tags_round_trip() {
    for base in [Base::A, Base::C, Base::G, Base::T] {
        assert_eq!(Base::from_tag(base.tag()), base);
    }
}

#[test]
fn top_two_bits_select_the_base() {
    assert_eq!(BaseReading::from_byte(0b0000_0000).base, Base::A);
    assert_eq!(BaseReading::from_byte(0b0100_0001).base, Base::C);
    assert_eq!(BaseReading::from_byte(0b1000_1000).base, Base::G);
    assert_eq!(BaseReading::from_byte(0b1110_0000).base, Base::T);
}

#[test]
fn low_six_bits_select_the_score() {
    assert_eq!(BaseReading::from_byte(0b0000_0000).score.to_binary(), 0);
    assert_eq!(BaseReading::from_byte(0b0100_0001).score.to_binary(), 1);
    assert_eq!(BaseReading::from_byte(0b1000_0111).score.to_binary(), 7);
    assert_eq!(BaseReading::from_byte(0b1111_1101).score.to_binary(), 61);
}

#[test]
fn all_ones_byte_is_a_valid_reading_not_end_of_stream() {
    let reading = BaseReading::from_byte(0b1111_1111);
    assert_eq!(reading.base, Base::T);
    assert_eq!(reading.score.to_binary(), 63);

    let mut rdr = reader_over(vec![0b1111_1111], 1);
    let fragment = rdr.read_fragment(1).unwrap().expect("0xFF is data, not EOF");
    assert_eq!(fragment.readings(), &[reading]);
}

#[test]
fn quality_score_rejects_values_above_63() {
    assert_eq!(
        QualityScore::of_binary(64).unwrap_err(),
        ValidationError::ScoreOutOfRange(64)
    );
    assert!(QualityScore::of_binary(255).is_err());
}

#[test]
fn quality_score_accepts_and_returns_values_in_range() {
    for v in [0u8, 15, 63] {
        assert_eq!(QualityScore::of_binary(v).unwrap().to_binary(), v);
    }
}

#[test]
fn quality_score_fastq_char_is_value_plus_33() {
    assert_eq!(QualityScore::of_binary(0).unwrap().to_fastq_char(), '!');
    assert_eq!(QualityScore::of_binary(15).unwrap().to_fastq_char(), '0');
    assert_eq!(QualityScore::of_binary(63).unwrap().to_fastq_char(), '`');
    for v in 0u8..=63 {
        let c = QualityScore::of_binary(v).unwrap().to_fastq_char();
        assert!(('!'..='`').contains(&c));
    }
}

/// Counts every call that could pull bytes from the source.
struct CountingReader {
    calls: Arc<AtomicUsize>,
}

impl Read for CountingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(0)
    }
}

impl BufRead for CountingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(&[])
    }
    fn consume(&mut self, _amt: usize) {}
}

#[test]
fn zero_length_fragment_request_never_touches_the_source() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut rdr = FragmentReader::from_bufread(
        CountingReader {
            calls: calls.clone(),
        },
        ConvertOptions::with_fragment_len(0),
    );

    let fragment = rdr.read_fragment(0).unwrap().unwrap();

    assert!(fragment.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn exhausted_source_yields_no_fragment() {
    let mut rdr = reader_over(vec![], 1);
    assert!(rdr.read_fragment(1).unwrap().is_none());
    assert!(rdr.read_reading().unwrap().is_none());
}

#[test]
fn stream_ending_mid_fragment_is_a_truncation_error() {
    let mut rdr = reader_over(vec![0b0100_0010], 2);
    let err = rdr.read_fragment(2).unwrap_err();
    match err {
        ConvertError::TruncatedFragment {
            expected, actual, ..
        } => {
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("expected truncation error, got {other}"),
    }
}

#[test]
fn read_fragment_collects_readings_in_stream_order() {
    let mut rdr = reader_over(vec![0b0100_0010, 0b1000_0100], 2);
    let fragment = rdr.read_fragment(2).unwrap().unwrap();

    let expected = Fragment::new(vec![
        BaseReading::new(Base::C, QualityScore::of_binary(2).unwrap()),
        BaseReading::new(Base::G, QualityScore::of_binary(4).unwrap()),
    ]);
    assert_eq!(fragment, expected);
    assert!(rdr.read_fragment(2).unwrap().is_none());
}

#[test]
fn reader_iterates_fragments_until_clean_end() {
    let rdr = reader_over(vec![0x00, 0x41, 0x82, 0xC3], 2);
    let fragments: Vec<_> = rdr.map(Result::unwrap).collect();
    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].len(), 2);
    assert_eq!(fragments[1].len(), 2);
}

#[test]
fn fragment_collects_from_decoded_bytes() {
    let fragment: Fragment = [0x00u8, 0xFF]
        .iter()
        .map(|&b| BaseReading::from_byte(b))
        .collect();
    assert_eq!(fragment.len(), 2);
    assert_eq!(fragment.readings()[0].to_string(), "<A, 0>");
    assert_eq!(fragment.readings()[1].to_string(), "<T, 63>");
}

#[test]
fn empty_fragment_writes_zero_bytes() {
    let mut wtr = FragmentWriter::new(Vec::new());
    wtr.write_fragment(&Fragment::default()).unwrap();
    assert!(wtr.into_inner().is_empty());
}

#[test]
fn written_fragment_reads_back_identically() {
    let original = Fragment::new(vec![
        BaseReading::new(Base::C, QualityScore::of_binary(2).unwrap()),
        BaseReading::new(Base::G, QualityScore::of_binary(4).unwrap()),
        BaseReading::new(Base::T, QualityScore::of_binary(63).unwrap()),
    ]);

    let mut wtr = FragmentWriter::new(Vec::new());
    wtr.write_fragment(&original).unwrap();
    let bytes = wtr.into_inner();
    assert_eq!(bytes.len(), original.len());

    let mut rdr = reader_over(bytes, original.len());
    let decoded = rdr.read_fragment(original.len()).unwrap().unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn single_readings_write_and_read_back() {
    let readings = [
        BaseReading::new(Base::A, QualityScore::of_binary(0).unwrap()),
        BaseReading::new(Base::C, QualityScore::of_binary(1).unwrap()),
        BaseReading::new(Base::G, QualityScore::of_binary(8).unwrap()),
        BaseReading::new(Base::T, QualityScore::of_binary(60).unwrap()),
    ];

    let mut wtr = FragmentWriter::new(Vec::new());
    for reading in readings {
        wtr.write_reading(reading).unwrap();
    }

    let mut rdr = reader_over(wtr.into_inner(), 1);
    for expected in readings {
        assert_eq!(rdr.read_reading().unwrap().unwrap(), expected);
    }
    assert!(rdr.read_reading().unwrap().is_none());
}
