/// 亂數來源，讓產生器可以在測試時換成固定序列
pub trait NumberSource: Send + Sync {
    /// 回傳 `[low, high]`（含兩端）之間均勻分布的整數
    fn draw(&self, low: u32, high: u32) -> u32;
}

impl<S: NumberSource + ?Sized> NumberSource for &S {
    fn draw(&self, low: u32, high: u32) -> u32 {
        (**self).draw(low, high)
    }
}

impl<S: NumberSource + ?Sized> NumberSource for Box<S> {
    fn draw(&self, low: u32, high: u32) -> u32 {
        (**self).draw(low, high)
    }
}
