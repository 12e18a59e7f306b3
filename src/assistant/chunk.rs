//! Message Chunking
//!
//! チャットの1メッセージあたりの長さ制限に合わせて、長いテキストを分割する。

/// 1メッセージの最大文字数
pub const MAX_MESSAGE_LEN: usize = 4000;

/// テキストを最大`limit`文字ずつの連続したチャンクに分割する
///
/// 文字（Unicodeスカラー値）単位で数えるため、マルチバイト文字の途中で切れることはありません。
/// 改行も含めて元のテキストをそのまま保持し、チャンクを連結すると元のテキストに戻ります。
/// 空のテキストはチャンクを生成しません。`limit`が0の場合は1として扱います。
///
/// ```rust
/// use rentsheet::chunk_message;
///
/// assert_eq!(chunk_message("abcdefg", 3), vec!["abc", "def", "g"]);
/// assert_eq!(chunk_message("short", 4000), vec!["short"]);
/// assert!(chunk_message("", 10).is_empty());
/// ```
pub fn chunk_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        if count == limit {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
