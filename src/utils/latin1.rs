use std::io::{self, BufRead};

/// ISO-8859-1 の NEL (次行)
const NEL: u8 = 0x85;

/// ISO-8859-1 として1byte = 1文字でデコードしながら行単位で読むイテレータ
///
/// 行末は `\n`, `\r\n`, `\r`, NEL (0x85) のいずれか。
/// 終端のない最終行も1行として返す。空の入力は0行。
pub struct Latin1Lines<R> {
    reader: R,
    /// 直前の行が `\r` で終わった場合、次の `\n` を読み捨てる
    skip_lf: bool,
    done: bool,
}

impl<R: BufRead> Latin1Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            skip_lf: false,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for Latin1Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut line = String::new();
        let mut has_content = false;
        loop {
            let (consumed, terminated) = {
                let buf = match self.reader.fill_buf() {
                    Ok(buf) => buf,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                };
                if buf.is_empty() {
                    self.done = true;
                    return has_content.then_some(Ok(line));
                }

                let mut i = 0;
                if self.skip_lf {
                    self.skip_lf = false;
                    if buf[0] == b'\n' {
                        i = 1;
                    }
                }
                let mut terminated = false;
                while i < buf.len() {
                    let byte = buf[i];
                    i += 1;
                    match byte {
                        b'\n' | NEL => {
                            terminated = true;
                            break;
                        }
                        b'\r' => {
                            self.skip_lf = true;
                            terminated = true;
                            break;
                        }
                        _ => {
                            has_content = true;
                            line.push(char::from(byte));
                        }
                    }
                }
                (i, terminated)
            };
            self.reader.consume(consumed);
            if terminated {
                return Some(Ok(line));
            }
        }
    }
}
