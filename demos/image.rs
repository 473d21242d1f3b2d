/// Generate a PNG which only contains a Data Matrix.
fn main() {
    env_logger::init();

    // Width and height in pixels of one module in the image.
    const N: u32 = 5;

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Hello, World!".to_string());
    let code = datamatrix_text::encode(&text, None).unwrap();

    // one module of quiet zone around the symbol
    let image = code.bitmap().to_image(N, 1, false);
    image.save("data_matrix.png").unwrap();
}
