mod edi;
mod shipping;
