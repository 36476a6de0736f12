use super::{Message, Transcript};

/// Fixed five-turn demo conversation.
///
/// Used when the session has no stored transcript so the report can always
/// be rendered.
pub fn sample_transcript() -> Transcript {
    vec![
        Message::assistant("안녕하세요! 만나서 반가워요 😊"),
        Message::user("안녕하세요! 저도 반가워요~"),
        Message::assistant("오늘 날씨가 좋네요. 뭐하고 계셨어요?"),
        Message::user("그냥 집에서 쉬고 있었어요. 요즘 좀 바빴거든요 ㅎㅎ"),
        Message::assistant("아 그렇구나, 많이 힘드셨겠다"),
        Message::user("네 좀 그랬어요. 근데 이제 좀 여유가 생겨서 다행이에요!"),
        Message::assistant("다행이네요! 뭐 특별히 하고 싶은 거 있어요?"),
        Message::user("음... 여행 가고 싶긴 한데, 어디가 좋을까요?"),
        Message::assistant("여행이라! 국내 vs 해외 중에 어디가 더 끌려요?"),
        Message::user(
            "국내가 좋을 것 같아요. 가볍게 다녀올 수 있으니까요. 추천해주실 곳 있어요?",
        ),
    ]
    .into()
}
