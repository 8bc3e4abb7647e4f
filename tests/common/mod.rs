//! 测试用 webhook 桩
//!
//! 只用于本仓库的投递测试，限制：
//! - 每个桩只接受一个连接、处理一个请求，响应后即关闭
//! - 请求体按 `Content-Length` 读取，不支持 chunked 编码
//! - 响应体固定为 `{}`

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;

/// 桩收到的请求
pub struct CapturedRequest {
    /// 如 `POST /v1/spaces/A/messages?key=k HTTP/1.1`
    pub request_line: String,
    /// 小写后的 header 文本
    pub headers: String,
    pub body: String,
}

/// 启动只响应一次的 webhook，返回 (url, 请求接收端)
///
/// `status_line` 形如 `"200 OK"`
pub fn spawn_webhook(status_line: &'static str) -> (String, mpsc::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let captured = read_request(&mut stream);

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{{}}",
            status_line
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        let _ = tx.send(captured);
    });

    (
        format!("http://127.0.0.1:{}/v1/spaces/AAAA1234/messages?key=k&token=t", port),
        rx,
    )
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    // 读到 header 结束
    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let body_len = content_length(&head);

    while buf.len() < header_end + body_len {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let (request_line, headers) = head.split_once("\r\n").unwrap_or((head.as_str(), ""));
    CapturedRequest {
        request_line: request_line.to_string(),
        headers: headers.to_lowercase(),
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    }
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
