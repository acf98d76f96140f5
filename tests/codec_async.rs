#[cfg(feature = "async")]
mod t {
    use dnabin2fastq::{AsyncFragmentReader, Base, ConvertOptions};
    use tempfile::tempdir;
    use tokio::fs::File;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn async_read_plain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reads.bin");
        {
            let mut f = File::create(&path).await.unwrap();
            f.write_all(&[0b0000_0000, 0b1110_0000]).await.unwrap();
        }
        let mut rdr = AsyncFragmentReader::from_path(&path, ConvertOptions::with_fragment_len(2))
            .await
            .unwrap();

        let fragment = rdr.next_fragment().await.unwrap().expect("one fragment");
        assert_eq!(fragment.len(), 2);
        assert_eq!(fragment.readings()[0].base, Base::A);
        assert_eq!(fragment.readings()[0].score.to_binary(), 0);
        assert_eq!(fragment.readings()[1].base, Base::T);
        assert_eq!(fragment.readings()[1].score.to_binary(), 32);

        assert!(rdr.next_fragment().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn async_truncation_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.bin");
        {
            let mut f = File::create(&path).await.unwrap();
            f.write_all(&[0b0100_0010]).await.unwrap();
        }
        let mut rdr = AsyncFragmentReader::from_path(&path, ConvertOptions::with_fragment_len(2))
            .await
            .unwrap();

        assert!(rdr.next_fragment().await.is_err());
    }
}
